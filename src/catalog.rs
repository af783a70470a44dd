// ============================================================================
// Piece Catalog
// ============================================================================

/// Number of piece variants.
pub const VARIANT_COUNT: usize = 7;

/// Occupancy pattern of one rotation state, indexed `[row][col]`.
pub type Mask = [[u8; 4]; 4];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    /// Every variant, in catalog order.
    pub const ALL: [TetrominoType; VARIANT_COUNT] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn rotations(self) -> &'static [Mask] {
        match self {
            TetrominoType::I => &I_ROTATIONS,
            TetrominoType::J => &J_ROTATIONS,
            TetrominoType::L => &L_ROTATIONS,
            TetrominoType::O => &O_ROTATIONS,
            TetrominoType::S => &S_ROTATIONS,
            TetrominoType::T => &T_ROTATIONS,
            TetrominoType::Z => &Z_ROTATIONS,
        }
    }

    /// Color tag used by renderers, `1..=7`.
    pub fn color(self) -> u8 {
        self as u8 + 1
    }
}

pub fn variant_count() -> usize {
    VARIANT_COUNT
}

pub fn rotation_states(tetromino_type: TetrominoType) -> &'static [Mask] {
    tetromino_type.rotations()
}

pub fn color(tetromino_type: TetrominoType) -> u8 {
    tetromino_type.color()
}

// ============================================================================
// Shapes
// ============================================================================

static I_ROTATIONS: [Mask; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
];

static J_ROTATIONS: [Mask; 4] = [
    [[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]],
];

static L_ROTATIONS: [Mask; 4] = [
    [[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
];

static O_ROTATIONS: [Mask; 1] = [[[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]]];

static S_ROTATIONS: [Mask; 2] = [
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
];

static T_ROTATIONS: [Mask; 4] = [
    [[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
];

static Z_ROTATIONS: [Mask; 2] = [
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];
