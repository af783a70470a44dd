//! Tests for the piece catalog, piece rotation and board rules
//!
//! Test categories:
//! - Catalog contents
//! - Piece rotation cycles
//! - Collision checks (walls, floor, filled cells, rows above the top)
//! - Placement
//! - Line clearing and row compaction

use blockfall::board::{test_helpers::*, Board, CellState, GRID_HEIGHT, GRID_WIDTH};
use blockfall::catalog::{self, TetrominoType, VARIANT_COUNT};
use blockfall::piece::{Tetromino, SPAWN_X, SPAWN_Y};

// ============================================================================
// Catalog Tests
// ============================================================================

mod catalog_contents {
    use super::*;

    #[test]
    fn has_seven_variants() {
        assert_eq!(catalog::variant_count(), 7);
        assert_eq!(TetrominoType::ALL.len(), VARIANT_COUNT);
    }

    #[test]
    fn rotation_counts_follow_symmetry() {
        let expected = [
            (TetrominoType::I, 2),
            (TetrominoType::J, 4),
            (TetrominoType::L, 4),
            (TetrominoType::O, 1),
            (TetrominoType::S, 2),
            (TetrominoType::T, 4),
            (TetrominoType::Z, 2),
        ];
        for (piece_type, count) in expected {
            assert_eq!(
                catalog::rotation_states(piece_type).len(),
                count,
                "{:?}",
                piece_type
            );
        }
    }

    #[test]
    fn every_mask_has_four_cells() {
        for piece_type in TetrominoType::ALL {
            for mask in catalog::rotation_states(piece_type) {
                let cells: u32 = mask.iter().flatten().map(|&bit| bit as u32).sum();
                assert_eq!(cells, 4, "{:?}", piece_type);
            }
        }
    }

    #[test]
    fn color_tags_are_distinct_and_in_range() {
        let mut tags: Vec<u8> = TetrominoType::ALL.iter().map(|&t| catalog::color(t)).collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn from_index_matches_catalog_order() {
        for (i, piece_type) in TetrominoType::ALL.iter().enumerate() {
            assert_eq!(TetrominoType::from_index(i), Some(*piece_type));
            assert_eq!(piece_type.index(), i);
        }
        assert_eq!(TetrominoType::from_index(VARIANT_COUNT), None);
    }
}

// ============================================================================
// Piece Tests
// ============================================================================

mod piece_rotation {
    use super::*;

    #[test]
    fn new_piece_spawns_centered_at_top() {
        let piece = Tetromino::new(TetrominoType::T);

        assert_eq!(piece.position.x, SPAWN_X);
        assert_eq!(piece.position.y, SPAWN_Y);
        assert_eq!(SPAWN_X, 3);
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn rotate_wraps_around() {
        let mut piece = Tetromino::new(TetrominoType::I);

        piece.rotate();
        assert_eq!(piece.rotation, 1);
        piece.rotate();
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn full_cycle_restores_rotation_and_mask() {
        for piece_type in TetrominoType::ALL {
            let mut piece = Tetromino::new(piece_type);
            piece.rotate();
            let (rotation, mask) = (piece.rotation, *piece.mask());

            for _ in 0..piece.rotation_count() {
                piece.rotate();
            }

            assert_eq!(piece.rotation, rotation, "{:?}", piece_type);
            assert_eq!(*piece.mask(), mask, "{:?}", piece_type);
        }
    }

    #[test]
    fn o_piece_rotation_is_noop() {
        let mut piece = Tetromino::new(TetrominoType::O);
        let before: Vec<_> = piece.occupied_cells().collect();

        piece.rotate();

        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.occupied_cells().collect::<Vec<_>>(), before);
    }

    #[test]
    fn occupied_cells_follow_mask() {
        let piece = Tetromino::new(TetrominoType::I);
        let cells: Vec<_> = piece.occupied_cells().collect();

        assert_eq!(cells, vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
    }
}

// ============================================================================
// Collision Tests
// ============================================================================

mod collision {
    use super::*;

    #[test]
    fn fits_on_empty_board() {
        let board = Board::new();
        let piece = Tetromino::new(TetrominoType::T);

        assert!(board.can_place(&piece, SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn rejects_left_wall() {
        let board = Board::new();
        // J rotation 0 uses mask column 0
        let piece = Tetromino::new(TetrominoType::J);

        assert!(board.can_place(&piece, 0, 5));
        assert!(!board.can_place(&piece, -1, 5));
    }

    #[test]
    fn empty_mask_columns_may_hang_off_the_wall() {
        let board = Board::new();
        // O occupies mask columns 1 and 2 only
        let piece = Tetromino::new(TetrominoType::O);

        assert!(board.can_place(&piece, -1, 5));
        assert!(!board.can_place(&piece, -2, 5));
        assert!(board.can_place(&piece, GRID_WIDTH as i16 - 3, 5));
        assert!(!board.can_place(&piece, GRID_WIDTH as i16 - 2, 5));
    }

    #[test]
    fn rejects_right_wall() {
        let board = Board::new();
        let piece = Tetromino::new(TetrominoType::I);

        assert!(board.can_place(&piece, GRID_WIDTH as i16 - 4, 5));
        assert!(!board.can_place(&piece, GRID_WIDTH as i16 - 3, 5));
    }

    #[test]
    fn rejects_floor() {
        let board = Board::new();
        // O occupies mask rows 1 and 2
        let piece = Tetromino::new(TetrominoType::O);

        assert!(board.can_place(&piece, 4, GRID_HEIGHT as i16 - 3));
        assert!(!board.can_place(&piece, 4, GRID_HEIGHT as i16 - 2));
    }

    #[test]
    fn rows_above_top_are_vacant() {
        let board = Board::from_rows({
            let mut rows = empty_rows();
            fill_row(&mut rows, 0);
            rows
        });
        let piece = Tetromino::new(TetrominoType::I);

        // Mask row 1 lands on board row -1
        assert!(board.can_place(&piece, 3, -2));
        // Mask row 1 lands on the filled row 0
        assert!(!board.can_place(&piece, 3, -1));
    }

    #[test]
    fn rows_above_top_still_respect_walls() {
        let board = Board::new();
        let piece = Tetromino::new(TetrominoType::I);

        assert!(!board.can_place(&piece, -1, -3));
        assert!(!board.can_place(&piece, GRID_WIDTH as i16 - 3, -3));
    }

    #[test]
    fn extreme_anchors_are_rejected_without_overflow() {
        let board = Board::new();
        let piece = Tetromino::new(TetrominoType::I);

        assert!(!board.can_place(&piece, i16::MAX, 5));
        assert!(!board.can_place(&piece, i16::MIN, 5));
        assert!(!board.can_place(&piece, 3, i16::MAX));
        // Entirely above the board: vacant
        assert!(board.can_place(&piece, 3, i16::MIN));
    }

    #[test]
    fn rejects_filled_cell() {
        let mut rows = empty_rows();
        rows[10][5] = CellState::Filled(TetrominoType::O);
        let board = Board::from_rows(rows);
        let piece = Tetromino::new(TetrominoType::O);

        // O at (4, 8) covers rows 9-10, columns 5-6
        assert!(!board.can_place(&piece, 4, 8));
        assert!(board.can_place(&piece, 4, 7));
    }
}

// ============================================================================
// Placement Tests
// ============================================================================

mod placement {
    use super::*;

    #[test]
    fn place_writes_only_piece_cells() {
        let mut board = Board::new();
        let piece = Tetromino::new(TetrominoType::T);
        assert!(board.can_place(&piece, 2, 10));

        board.place(&piece, 2, 10);

        // T rotation 0: (1,1), (2,0), (2,1), (2,2)
        let expected = [(11, 3), (12, 2), (12, 3), (12, 4)];
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                let cell = board.cell(row, col);
                if expected.contains(&(row, col)) {
                    assert_eq!(cell, CellState::Filled(TetrominoType::T));
                } else {
                    assert_eq!(cell, CellState::Empty, "({}, {})", row, col);
                }
            }
        }
    }

    #[test]
    fn place_keeps_existing_cells() {
        let mut rows = empty_rows();
        fill_row_with_gap(&mut rows, GRID_HEIGHT - 1, 9);
        let mut board = Board::from_rows(rows);
        let mut piece = Tetromino::new(TetrominoType::I);
        piece.rotate();

        board.place(&piece, 7, GRID_HEIGHT as i16 - 4);

        assert!(board.is_row_complete(GRID_HEIGHT - 1));
        assert_eq!(board.cell(GRID_HEIGHT - 1, 9), CellState::Filled(TetrominoType::I));
        assert_eq!(board.cell(GRID_HEIGHT - 1, 0), CellState::Filled(TetrominoType::T));
        assert_eq!(board.total_filled_cells(), GRID_WIDTH + 3);
    }

    #[test]
    fn cells_above_top_are_dropped() {
        let mut board = Board::new();
        let mut piece = Tetromino::new(TetrominoType::I);
        piece.rotate();
        assert!(board.can_place(&piece, 0, -2));

        board.place(&piece, 0, -2);

        assert_eq!(board.total_filled_cells(), 2);
        assert_eq!(board.cell(0, 2), CellState::Filled(TetrominoType::I));
        assert_eq!(board.cell(1, 2), CellState::Filled(TetrominoType::I));
    }
}

// ============================================================================
// Line Clearing Tests
// ============================================================================

mod line_clearing {
    use super::*;

    #[test]
    fn no_full_rows_leaves_board_unchanged() {
        let mut rows = empty_rows();
        fill_row_with_gap(&mut rows, GRID_HEIGHT - 1, 5);
        rows[10][3] = CellState::Filled(TetrominoType::S);
        let mut board = Board::from_rows(rows);
        let before = board.clone();

        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn single_row_shifts_rows_above_down() {
        let mut rows = empty_rows();
        fill_row(&mut rows, GRID_HEIGHT - 1);
        rows[GRID_HEIGHT - 2][0] = CellState::Filled(TetrominoType::J);
        rows[GRID_HEIGHT - 3][1] = CellState::Filled(TetrominoType::L);
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_lines(), 1);

        assert_eq!(board.cell(GRID_HEIGHT - 1, 0), CellState::Filled(TetrominoType::J));
        assert_eq!(board.cell(GRID_HEIGHT - 2, 1), CellState::Filled(TetrominoType::L));
        assert_eq!(board.filled_count_in_row(0), 0);
        assert_eq!(board.total_filled_cells(), 2);
    }

    #[test]
    fn contiguous_rows_cleared_together() {
        let mut rows = empty_rows();
        for i in 0..4 {
            fill_row(&mut rows, GRID_HEIGHT - 1 - i);
        }
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_lines(), 4);
        assert_eq!(board.total_filled_cells(), 0);
    }

    #[test]
    fn three_separated_rows_keep_relative_order() {
        let mut rows = empty_rows();
        fill_row(&mut rows, 5);
        fill_row(&mut rows, 10);
        fill_row(&mut rows, 15);
        rows[4][0] = CellState::Filled(TetrominoType::J);
        rows[9][1] = CellState::Filled(TetrominoType::L);
        rows[14][2] = CellState::Filled(TetrominoType::S);
        rows[19][3] = CellState::Filled(TetrominoType::Z);
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_lines(), 3);

        assert_eq!(board.cell(7, 0), CellState::Filled(TetrominoType::J));
        assert_eq!(board.cell(11, 1), CellState::Filled(TetrominoType::L));
        assert_eq!(board.cell(15, 2), CellState::Filled(TetrominoType::S));
        assert_eq!(board.cell(19, 3), CellState::Filled(TetrominoType::Z));
        assert_eq!(board.total_filled_cells(), 4);
        for y in 0..3 {
            assert_eq!(board.filled_count_in_row(y), 0);
        }
    }

    #[test]
    fn clear_top_row() {
        let mut rows = empty_rows();
        fill_row(&mut rows, 0);
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.filled_count_in_row(0), 0);
    }

    #[test]
    fn all_rows_filled_and_cleared() {
        let mut rows = empty_rows();
        for y in 0..GRID_HEIGHT {
            fill_row(&mut rows, y);
        }
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_lines(), GRID_HEIGHT as u32);
        assert_eq!(board, Board::new());
    }
}
