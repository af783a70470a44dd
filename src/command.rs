//! Driver seam: everything that reaches the engine goes through here.
//!
//! Input and the gravity timer are two independent sources. They meet in a
//! [`CommandStream`] read by a single consumer, which hands each command to
//! [`dispatch`], so engine calls never overlap.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Game;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Tick,
    Move { dx: i16, dy: i16 },
    Rotate,
    TogglePause,
    Pause,
    Resume,
    Restart,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// Key Mapping
// ============================================================================

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Left => Some(Command::Move { dx: -1, dy: 0 }),
        KeyCode::Right => Some(Command::Move { dx: 1, dy: 0 }),
        KeyCode::Down => Some(Command::Move { dx: 0, dy: 1 }),
        KeyCode::Up | KeyCode::Char(' ') => Some(Command::Rotate),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Applies `command` to `game`. `Restart` only takes effect once the game is
/// over, so a stray key press cannot wipe a running game.
pub fn dispatch(game: &mut Game, command: Command) -> Flow {
    match command {
        Command::Tick => game.tick(),
        Command::Move { dx, dy } => {
            game.move_piece(dx, dy);
        }
        Command::Rotate => {
            game.rotate_piece();
        }
        Command::TogglePause => game.toggle_pause(),
        Command::Pause => game.pause(),
        Command::Resume => game.resume(),
        Command::Restart => {
            if game.is_game_over() {
                game.restart();
            }
        }
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

// ============================================================================
// Command Stream
// ============================================================================

/// Merges input commands with a gravity timer into one ordered stream.
///
/// Input producers send `Err` when reading the terminal fails; the error is
/// handed to the consumer as-is.
pub struct CommandStream {
    input: Receiver<io::Result<Command>>,
    deadline: Instant,
}

impl CommandStream {
    pub fn new(input: Receiver<io::Result<Command>>, speed: Duration) -> Self {
        Self {
            input,
            deadline: Instant::now() + speed,
        }
    }

    /// Blocks until the next command. Yields `Tick` once the deadline has
    /// passed and re-arms it with `speed`; yields `Quit` when every input
    /// producer has gone away. Input errors are returned.
    pub fn next(&mut self, speed: Duration) -> io::Result<Command> {
        let timeout = self.deadline.saturating_duration_since(Instant::now());
        if timeout.is_zero() {
            return Ok(self.tick(speed));
        }

        match self.input.recv_timeout(timeout) {
            Ok(input) => input,
            Err(RecvTimeoutError::Timeout) => Ok(self.tick(speed)),
            Err(RecvTimeoutError::Disconnected) => Ok(Command::Quit),
        }
    }

    fn tick(&mut self, speed: Duration) -> Command {
        self.deadline = Instant::now() + speed;
        Command::Tick
    }
}
