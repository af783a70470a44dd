use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::catalog::{TetrominoType, VARIANT_COUNT};
use crate::piece::{Position, Tetromino, SPAWN_X, SPAWN_Y};
use crate::snapshot::Snapshot;

// ============================================================================
// Configuration
// ============================================================================

// Timing
pub const BASE_SPEED: Duration = Duration::from_millis(500);
pub const MIN_SPEED: Duration = Duration::from_millis(50);
pub const SPEED_STEP: Duration = Duration::from_millis(50);

// Scoring, multiplied by the level in effect when the lines clear
pub const SCORE_SINGLE: u32 = 40;
pub const SCORE_DOUBLE: u32 = 100;
pub const SCORE_TRIPLE: u32 = 300;
pub const SCORE_TETRIS: u32 = 1200;
pub const POINTS_PER_LEVEL: u32 = 1000;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    /// Reserved for drivers with a title screen; the engine starts in `Playing`.
    Starting,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    LevelUp(u32),
    Paused,
    Resumed,
    GameRestarted,
    GameOver,
}

/// Delay between gravity ticks at `level`.
pub fn speed_for_level(level: u32) -> Duration {
    BASE_SPEED
        .saturating_sub(SPEED_STEP.saturating_mul(level.saturating_sub(1)))
        .max(MIN_SPEED)
}

/// Points for clearing `lines` rows in one placement, before the level
/// multiplier.
pub fn line_clear_reward(lines: u32) -> u32 {
    match lines {
        0 => 0,
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        _ => SCORE_TETRIS,
    }
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> TetrominoType;
}

/// Uniform choice over every variant.
pub struct RandomPieceProvider {
    rng: StdRng,
}

impl RandomPieceProvider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPieceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        TetrominoType::ALL[self.rng.gen_range(0..VARIANT_COUNT)]
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequencePieceProvider {
    /// Cycles through `pieces`.
    ///
    /// # Panics
    ///
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<TetrominoType>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    board: Board,
    current_piece: Tetromino,
    next_piece: Tetromino,
    score: u32,
    level: u32,
    speed: Duration,
    state: GameState,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::new()))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_provider(Box::new(RandomPieceProvider::seeded(seed)))
    }

    /// Draws the active piece, then the next one.
    pub fn with_provider(mut provider: Box<dyn PieceProvider>) -> Self {
        let current_piece = Tetromino::new(provider.next_piece());
        Self::with_board(Board::new(), current_piece, provider)
    }

    /// Starts from an arbitrary board and active piece; only the next piece
    /// is drawn from `provider`.
    pub fn with_board(
        board: Board,
        current_piece: Tetromino,
        mut provider: Box<dyn PieceProvider>,
    ) -> Self {
        let next_piece = Tetromino::new(provider.next_piece());
        Self {
            board,
            current_piece,
            next_piece,
            score: 0,
            level: 1,
            speed: BASE_SPEED,
            state: GameState::Playing,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Tetromino {
        &self.current_piece
    }

    pub fn next_piece(&self) -> &Tetromino {
        &self.next_piece
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: *self.board.rows(),
            active: self.current_piece,
            next: self.next_piece,
            score: self.score,
            level: self.level,
            speed: self.speed,
            state: self.state,
        }
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Gravity step: drop the active piece one row, or lock it and bring in
    /// the next one when it cannot fall.
    pub fn tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        let Position { x, y } = self.current_piece.position;
        let below = y.checked_add(1);
        if let Some(y) = below.filter(|&y| self.board.can_place(&self.current_piece, x, y)) {
            self.current_piece.position.y = y;
        } else {
            self.lock_and_spawn();
        }
    }

    fn lock_and_spawn(&mut self) {
        let position = self.current_piece.position;
        self.board.place(&self.current_piece, position.x, position.y);
        self.events.push(GameEvent::PieceLocked);

        let lines = self.board.clear_lines();
        if lines > 0 {
            self.events.push(GameEvent::LinesCleared(lines));
        }
        self.update_score_and_speed(lines);

        let incoming = Tetromino::new(self.piece_provider.next_piece());
        self.current_piece = std::mem::replace(&mut self.next_piece, incoming);
        self.current_piece.position.x = SPAWN_X;
        self.current_piece.position.y = SPAWN_Y;

        if !self
            .board
            .can_place(&self.current_piece, SPAWN_X, SPAWN_Y)
        {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    /// Shifts the active piece by `(dx, dy)` if the target is free. Returns
    /// whether it moved.
    pub fn move_piece(&mut self, dx: i16, dy: i16) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Position { x, y } = self.current_piece.position;
        let (Some(x), Some(y)) = (x.checked_add(dx), y.checked_add(dy)) else {
            return false;
        };
        if !self.board.can_place(&self.current_piece, x, y) {
            return false;
        }
        self.current_piece.position.x = x;
        self.current_piece.position.y = y;
        self.events.push(GameEvent::PieceMoved);
        true
    }

    /// Rotates the active piece in place. There are no wall kicks: a
    /// rotation that collides is undone.
    pub fn rotate_piece(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let previous = self.current_piece.rotation;
        self.current_piece.rotate();
        let position = self.current_piece.position;
        if !self
            .board
            .can_place(&self.current_piece, position.x, position.y)
        {
            self.current_piece.rotation = previous;
            return false;
        }
        self.events.push(GameEvent::PieceRotated);
        true
    }

    /// Applies the line-clear reward for `lines`, then derives level and
    /// speed from the new score.
    pub fn update_score_and_speed(&mut self, lines: u32) {
        let reward = line_clear_reward(lines).saturating_mul(self.level);
        self.score = self.score.saturating_add(reward);

        let level = self.score / POINTS_PER_LEVEL + 1;
        if level > self.level {
            self.events.push(GameEvent::LevelUp(level));
        }
        self.level = level;
        self.speed = speed_for_level(level);
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => self.pause(),
            GameState::Paused => self.resume(),
            GameState::Starting | GameState::GameOver => {}
        }
    }

    /// Full reset: empty board, fresh pieces from the same provider, and the
    /// starting score, level and speed.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.current_piece = Tetromino::new(self.piece_provider.next_piece());
        self.next_piece = Tetromino::new(self.piece_provider.next_piece());

        self.score = 0;
        self.level = 1;
        self.speed = BASE_SPEED;
        self.state = GameState::Playing;

        self.events.clear();
        self.events.push(GameEvent::GameRestarted);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
