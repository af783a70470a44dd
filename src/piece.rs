use crate::board::GRID_WIDTH;
use crate::catalog::{Mask, TetrominoType};

/// Column of the mask's left edge for freshly spawned pieces.
pub const SPAWN_X: i16 = GRID_WIDTH as i16 / 2 - 2;
pub const SPAWN_Y: i16 = 0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

/// A live piece: variant, rotation index and the grid coordinate of its
/// mask's top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tetromino {
    pub tetromino_type: TetrominoType,
    pub position: Position,
    pub rotation: usize,
}

impl Tetromino {
    pub fn new(tetromino_type: TetrominoType) -> Self {
        Self::new_at(tetromino_type, SPAWN_X, SPAWN_Y)
    }

    pub fn new_at(tetromino_type: TetrominoType, x: i16, y: i16) -> Self {
        Self {
            tetromino_type,
            position: Position { x, y },
            rotation: 0,
        }
    }

    pub fn rotation_count(&self) -> usize {
        self.tetromino_type.rotations().len()
    }

    pub fn mask(&self) -> &'static Mask {
        let rotations = self.tetromino_type.rotations();
        &rotations[self.rotation % rotations.len()]
    }

    /// Advances to the next rotation state. Board legality is the caller's
    /// concern, so the previous index can be restored on collision.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.rotation_count();
    }

    /// Mask-relative `(row, col)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i16, i16)> + 'static {
        let mask = self.mask();
        (0..4).flat_map(move |i| {
            (0..4)
                .filter(move |&j| mask[i][j] != 0)
                .map(move |j| (i as i16, j as i16))
        })
    }

    pub fn color(&self) -> u8 {
        self.tetromino_type.color()
    }
}
