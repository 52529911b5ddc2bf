use crate::sim::{Command, TickInput};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Pending commands the capture thread may hold before it blocks.
pub(crate) const INPUT_QUEUE: usize = 10;

pub(crate) fn map_key(k: KeyEvent) -> Option<Command> {
    if k.kind != KeyEventKind::Press && k.kind != KeyEventKind::Repeat {
        return None;
    }
    if matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && k.modifiers.contains(KeyModifiers::CONTROL)
    {
        return Some(Command::Quit);
    }
    match k.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::MoveDown),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Starts the capture thread. It blocks on the terminal, and on the queue
/// when the game loop falls behind, so no key press is dropped.
pub(crate) fn spawn_capture() -> (Receiver<Command>, JoinHandle<()>) {
    let (tx, rx) = bounded(INPUT_QUEUE);
    let handle = thread::spawn(move || capture_loop(tx));
    (rx, handle)
}

fn capture_loop(tx: Sender<Command>) {
    loop {
        match event::read() {
            Ok(Event::Key(k)) => {
                let Some(cmd) = map_key(k) else { continue };
                if tx.send(cmd).is_err() {
                    debug!("game loop gone, input capture stopping");
                    return;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "reading terminal input failed");
                return;
            }
        }
    }
}

/// Takes whatever is queued right now without waiting. A disconnected
/// queue reads as a quit.
pub(crate) fn drain(rx: &Receiver<Command>) -> TickInput {
    let mut input = TickInput::default();
    loop {
        match rx.try_recv() {
            Ok(cmd) => input.push(cmd),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                input.quit = true;
                break;
            }
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Command::MoveUp));
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(Command::MoveDown));
        assert_eq!(map_key(press(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(map_key(press(KeyCode::Char('D'))), Some(Command::MoveRight));
    }

    #[test]
    fn commands_and_unknown_keys() {
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Enter)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn drain_merges_queued_commands_without_blocking() {
        let (tx, rx) = bounded(INPUT_QUEUE);
        for cmd in [Command::MoveUp, Command::MoveUp, Command::MoveRight] {
            tx.send(cmd).unwrap();
        }
        let input = drain(&rx);
        assert_eq!((input.dx, input.dy), (1, -2));
        assert!(!input.quit);

        assert_eq!(drain(&rx), TickInput::default());
    }

    #[test]
    fn drain_treats_disconnect_as_quit() {
        let (tx, rx) = bounded::<Command>(INPUT_QUEUE);
        tx.send(Command::MoveDown).unwrap();
        drop(tx);
        let input = drain(&rx);
        assert_eq!(input.dy, 1);
        assert!(input.quit);
    }

    #[test]
    fn full_queue_applies_backpressure() {
        let (tx, rx) = bounded(INPUT_QUEUE);
        for _ in 0..INPUT_QUEUE {
            tx.send(Command::MoveLeft).unwrap();
        }
        assert!(tx.try_send(Command::MoveLeft).is_err());
        assert_eq!(drain(&rx).dx, -(INPUT_QUEUE as i32));
        assert!(tx.try_send(Command::MoveLeft).is_ok());
    }
}
