use crate::model::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::sim::{Snapshot, StatusLine};
use anyhow::Context;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

const BG: Color = Color::Black;
const BORDER_FG: Color = Color::Rgb {
    r: 255,
    g: 105,
    b: 180,
};
const AREA_FG: Color = Color::Rgb {
    r: 138,
    g: 43,
    b: 226,
};
const TREASURE_FG: Color = Color::Rgb {
    r: 255,
    g: 215,
    b: 0,
};

const ROCK: char = '#';
const SHIP: char = '>';
const WRECK: char = 'X';
const TREASURE: char = '$';

const HINT_PLAYING: &str = "move with arrows. esc/q to quit";
const HINT_CRASHED: &str = "crashed! press r to restart, esc/q to quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrameCell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

const BLANK: FrameCell = FrameCell {
    ch: ' ',
    fg: BORDER_FG,
    bg: BG,
};

pub(crate) struct Frame {
    pub(crate) w: u16,
    pub(crate) h: u16,
    cells: Vec<FrameCell>,
}

impl Frame {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![BLANK; (w as usize) * (h as usize)],
        }
    }

    /// A frame that matches nothing, so the next diff redraws every cell.
    fn stale(w: u16, h: u16) -> Self {
        let mut f = Self::new(w, h);
        f.cells.fill(FrameCell { ch: '\0', ..BLANK });
        f
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, x: u16, y: u16) -> Option<FrameCell> {
        (x < self.w && y < self.h).then(|| self.cells[self.idx(x, y)])
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = self.idx(x as u16, y as u16);
        self.cells[i] = FrameCell { ch, fg, bg: BG };
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg);
        }
    }

    fn put_centered(&mut self, y: i32, s: &str, fg: Color) {
        let x = (self.w as i32 - s.chars().count() as i32) / 2;
        self.put_str(x.max(0), y, s, fg);
    }

    #[cfg(test)]
    pub(crate) fn row_text(&self, y: u16) -> String {
        (0..self.w)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

/// Top-left corner of the play area, centered in the terminal.
pub(crate) fn play_origin(term_w: u16, term_h: u16) -> (i32, i32) {
    (
        (term_w as i32 - PLAY_WIDTH as i32) / 2,
        (term_h as i32 - PLAY_HEIGHT as i32) / 2,
    )
}

/// Draws one snapshot into `frame`, sized to the current terminal.
pub(crate) fn compose(frame: &mut Frame, snap: &Snapshot<'_>) {
    frame.clear();
    let (ox, oy) = play_origin(frame.w, frame.h);

    for col in 0..snap.width {
        let (top, bottom) = (snap.top[col], snap.bottom[col]);
        for row in 0..snap.height as i32 {
            let ch = if row <= top || row > bottom { ROCK } else { ' ' };
            frame.put(ox + col as i32, oy + row, ch, AREA_FG);
        }
    }

    if snap.treasure.visible {
        let t = snap.treasure.pos;
        frame.put(ox + t.col, oy + t.row, TREASURE, TREASURE_FG);
    }

    let p = snap.player;
    let ship = if p.alive { SHIP } else { WRECK };
    frame.put(ox + p.pos.col, oy + p.pos.row, ship, BORDER_FG);

    if (frame.w as usize) < PLAY_WIDTH || (frame.h as usize) < PLAY_HEIGHT {
        let warning = format!(
            "Terminal too small! Need at least {}x{}, now is {}x{}",
            PLAY_WIDTH, PLAY_HEIGHT, frame.w, frame.h
        );
        frame.put_centered(0, &warning, BORDER_FG);
    } else {
        let hud = format!(
            "score {:>7}   tick {:>3}ms",
            snap.score,
            snap.tick_interval.as_millis()
        );
        frame.put_str(ox.max(0), (oy - 1).max(0), &hud, BORDER_FG);
    }

    let hint = match snap.status {
        StatusLine::Playing => HINT_PLAYING,
        StatusLine::Crashed => HINT_CRASHED,
    };
    frame.put_centered(frame.h as i32 - 1, hint, BORDER_FG);
}

/// The terminal side: alternate screen, raw mode and diffed redraws.
pub(crate) struct Screen {
    out: Stdout,
    prev: Frame,
    cur: Frame,
}

impl Screen {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode().context("could not enable raw mode")?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        let (w, h) = terminal::size()?;
        Ok(Self {
            out,
            prev: Frame::stale(w, h),
            cur: Frame::new(w, h),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn resize_if_needed(&mut self) -> anyhow::Result<()> {
        let (w, h) = terminal::size()?;
        if w == self.cur.w && h == self.cur.h {
            return Ok(());
        }
        self.prev = Frame::stale(w, h);
        self.cur = Frame::new(w, h);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    pub(crate) fn present(&mut self, snap: &Snapshot<'_>) -> anyhow::Result<()> {
        self.resize_if_needed()?;
        compose(&mut self.cur, snap);
        self.flush_diff()?;
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut cur_fg = None::<Color>;
        let mut cur_bg = None::<Color>;

        for y in 0..self.cur.h {
            for x in 0..self.cur.w {
                let i = self.cur.idx(x, y);
                let a = self.cur.cells[i];
                if a == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if cur_fg != Some(a.fg) {
                    queue!(self.out, SetForegroundColor(a.fg))?;
                    cur_fg = Some(a.fg);
                }
                if cur_bg != Some(a.bg) {
                    queue!(self.out, SetBackgroundColor(a.bg))?;
                    cur_bg = Some(a.bg);
                }
                queue!(self.out, Print(a.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}
