use crate::config::Rules;
use crate::model::{Player, Treasure, PLAY_HEIGHT, PLAY_WIDTH};
use crate::rng::SessionRng;
use crate::terrain::Terrain;
use crate::treasure::TreasureStep;
use std::time::Duration;
use tracing::{debug, info, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Restart,
    Quit,
}

/// Everything the player asked for during one tick, merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TickInput {
    pub(crate) dx: i32,
    pub(crate) dy: i32,
    pub(crate) restart: bool,
    pub(crate) quit: bool,
}

impl TickInput {
    pub(crate) fn push(&mut self, cmd: Command) {
        match cmd {
            Command::MoveUp => self.dy -= 1,
            Command::MoveDown => self.dy += 1,
            Command::MoveLeft => self.dx -= 1,
            Command::MoveRight => self.dx += 1,
            Command::Restart => self.restart = true,
            Command::Quit => self.quit = true,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_commands<I: IntoIterator<Item = Command>>(cmds: I) -> Self {
        let mut input = Self::default();
        for cmd in cmds {
            input.push(cmd);
        }
        input
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionState {
    Alive,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusLine {
    Playing,
    Crashed,
}

/// Read-only view handed to the display each frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Snapshot<'a> {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) top: &'a [i32; PLAY_WIDTH],
    pub(crate) bottom: &'a [i32; PLAY_WIDTH],
    pub(crate) player: Player,
    pub(crate) treasure: Treasure,
    pub(crate) score: u64,
    pub(crate) tick_interval: Duration,
    pub(crate) status: StatusLine,
}

pub(crate) struct Session {
    rules: Rules,
    rng: SessionRng,
    terrain: Terrain,
    player: Player,
    treasure: Treasure,
    score: u64,
    countdown: i32,
    tick_ms: u64,
    terminated: bool,
}

impl Session {
    pub(crate) fn new(rules: Rules) -> Self {
        info!(seed = rules.seed, "new session");
        Self {
            rng: SessionRng::new(rules.seed),
            terrain: Terrain::flat(),
            player: Player::spawn(),
            treasure: Treasure::default(),
            score: 0,
            countdown: rules.spawn_period,
            tick_ms: rules.initial_tick_ms,
            terminated: false,
            rules,
        }
    }

    /// Back to the starting state, replaying the same corridor.
    pub(crate) fn restart(&mut self) {
        info!(seed = self.rng.seed(), last_score = self.score, "restart");
        self.rng.reseed();
        self.terrain = Terrain::flat();
        self.player = Player::spawn();
        self.treasure = Treasure::default();
        self.score = 0;
        self.countdown = self.rules.spawn_period;
        self.tick_ms = self.rules.initial_tick_ms;
    }

    pub(crate) fn state(&self) -> SessionState {
        if self.player.alive {
            SessionState::Alive
        } else {
            SessionState::Dead
        }
    }

    pub(crate) fn terminated(&self) -> bool {
        self.terminated
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            top: self.terrain.top(),
            bottom: self.terrain.bottom(),
            player: self.player,
            treasure: self.treasure,
            score: self.score,
            tick_interval: self.tick_interval(),
            status: match self.state() {
                SessionState::Alive => StatusLine::Playing,
                SessionState::Dead => StatusLine::Crashed,
            },
        }
    }

    /// Advances the simulation by exactly one tick.
    pub(crate) fn step(&mut self, input: TickInput) {
        if input.quit {
            self.terminated = true;
            return;
        }

        if self.state() == SessionState::Dead {
            if input.restart {
                self.restart();
            }
            return;
        }

        if !self
            .player
            .clamp_and_collide(input.dx, input.dy, &self.terrain)
        {
            info!(
                score = self.score,
                col = self.player.pos.col,
                row = self.player.pos.row,
                "crashed"
            );
            return;
        }

        let draws = self.terrain.advance(&mut self.rng);
        match self.treasure.advance(
            &self.terrain,
            draws,
            &mut self.countdown,
            self.rules.spawn_period,
        ) {
            TreasureStep::Spawned => debug!(row = self.treasure.pos.row, "treasure spawned"),
            TreasureStep::Missed => debug!("treasure scrolled off"),
            TreasureStep::Scrolled | TreasureStep::Idle => {}
        }

        if self.treasure.take_at(self.player.pos) {
            self.score += self.rules.treasure_bonus;
            debug!(score = self.score, "treasure collected");
        }

        self.score += 1;
        self.countdown -= 1;
        trace!(score = self.score, countdown = self.countdown, "tick");

        if self.countdown == 0 {
            self.ramp_difficulty();
        }
    }

    fn ramp_difficulty(&mut self) {
        if self.tick_ms <= self.rules.min_tick_ms {
            return;
        }
        self.tick_ms = self
            .tick_ms
            .saturating_sub(self.rules.tick_step_ms)
            .max(self.rules.min_tick_ms);
        debug!(tick_ms = self.tick_ms, "speeding up");
    }
}
