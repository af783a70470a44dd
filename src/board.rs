use crate::catalog::TetrominoType;
use crate::piece::Tetromino;

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Filled(TetrominoType),
}

pub type Row = [CellState; GRID_WIDTH];

pub const EMPTY_ROW: Row = [CellState::Empty; GRID_WIDTH];

/// The settled cells. Knows nothing about the active piece: collision and
/// placement take the piece and position as arguments.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: [Row; GRID_HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; GRID_HEIGHT],
        }
    }

    pub fn from_rows(rows: [Row; GRID_HEIGHT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row; GRID_HEIGHT] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> CellState {
        self.rows[row][col]
    }

    /// Whether `piece` fits with its mask anchored at `(x, y)`.
    ///
    /// Walls and floor are hard limits, but rows above the top edge count as
    /// vacant so pieces can spawn or rotate while partly off screen.
    pub fn can_place(&self, piece: &Tetromino, x: i16, y: i16) -> bool {
        piece.occupied_cells().all(|(i, j)| {
            let col = i32::from(x) + i32::from(j);
            let row = i32::from(y) + i32::from(i);
            if col < 0 || col >= GRID_WIDTH as i32 || row >= GRID_HEIGHT as i32 {
                return false;
            }
            row < 0 || self.rows[row as usize][col as usize] == CellState::Empty
        })
    }

    /// Writes `piece` into the grid at `(x, y)`.
    ///
    /// The position must have passed [`Board::can_place`]. Cells above the
    /// top edge are dropped.
    ///
    /// # Panics
    ///
    /// Panics if an occupied cell lands outside the columns or below the
    /// floor.
    pub fn place(&mut self, piece: &Tetromino, x: i16, y: i16) {
        let filled = CellState::Filled(piece.tetromino_type);
        for (i, j) in piece.occupied_cells() {
            let row = i32::from(y) + i32::from(i);
            if row < 0 {
                continue;
            }
            let col = i32::from(x) + i32::from(j);
            self.rows[row as usize][col as usize] = filled;
        }
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. Each full row is collapsed right
    /// away: everything above drops by one and row 0 becomes empty.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..GRID_HEIGHT {
            if self.is_row_complete(y) {
                cleared += 1;
                self.rows.copy_within(0..y, 1);
                self.rows[0] = EMPTY_ROW;
            }
        }
        cleared
    }

    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| *cell != CellState::Empty)
    }

    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows[y]
            .iter()
            .filter(|cell| **cell != CellState::Empty)
            .count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell != CellState::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_rows() -> [Row; GRID_HEIGHT] {
        [EMPTY_ROW; GRID_HEIGHT]
    }

    pub fn fill_row(rows: &mut [Row; GRID_HEIGHT], y: usize) {
        rows[y] = [CellState::Filled(TetrominoType::T); GRID_WIDTH];
    }

    pub fn fill_row_with_gap(rows: &mut [Row; GRID_HEIGHT], y: usize, gap_x: usize) {
        fill_row(rows, y);
        rows[y][gap_x] = CellState::Empty;
    }
}
