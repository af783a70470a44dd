use std::time::Duration;

use crate::board::{CellState, Row, GRID_HEIGHT, GRID_WIDTH};
use crate::game::GameState;
use crate::piece::Tetromino;

/// Owned copy of everything a renderer needs from the engine.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub grid: [Row; GRID_HEIGHT],
    pub active: Tetromino,
    pub next: Tetromino,
    pub score: u32,
    pub level: u32,
    pub speed: Duration,
    pub state: GameState,
}

impl Snapshot {
    /// Returns the visual grid state with the active piece overlaid
    pub fn render_grid(&self) -> [Row; GRID_HEIGHT] {
        let mut visual_grid = self.grid;
        let Tetromino { position, .. } = self.active;

        for (i, j) in self.active.occupied_cells() {
            let x = i32::from(position.x) + i32::from(j);
            let y = i32::from(position.y) + i32::from(i);
            if y >= 0 && y < GRID_HEIGHT as i32 && x >= 0 && x < GRID_WIDTH as i32 {
                visual_grid[y as usize][x as usize] =
                    CellState::Filled(self.active.tetromino_type);
            }
        }

        visual_grid
    }
}
