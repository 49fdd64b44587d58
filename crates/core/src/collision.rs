//! Collision checks for the active piece.

use crate::board::Board;
use crate::types::Pos;

/// Whether the active piece may occupy `(row, col)`.
///
/// Rows above the board (negative) are always free; the bottom boundary and
/// the side walls are not. Inside the board the cell must be empty.
pub fn can_occupy(board: &Board, row: i32, col: i32) -> bool {
    if row >= board.rows() as i32 || col < 0 || col >= board.columns() as i32 {
        return false;
    }
    if row < 0 {
        return true;
    }
    !board.is_occupied(Pos::new(row as usize, col as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_boundary_blocks() {
        let board = Board::new(5, 4);
        assert!(can_occupy(&board, 4, 0));
        assert!(!can_occupy(&board, 5, 0));
        assert!(!can_occupy(&board, 6, 0));
    }

    #[test]
    fn side_walls_block() {
        let board = Board::new(5, 4);
        assert!(!can_occupy(&board, 0, -1));
        assert!(!can_occupy(&board, 0, 4));
        assert!(can_occupy(&board, 0, 3));
    }

    #[test]
    fn above_board_is_free() {
        let board = Board::from_rows(&["AAAA", "AAAA"]).unwrap();
        assert!(can_occupy(&board, -1, 2));
        assert!(!can_occupy(&board, -1, 4));
    }

    #[test]
    fn occupied_cells_block() {
        let board = Board::from_rows(&["....", ".B.."]).unwrap();
        assert!(!can_occupy(&board, 1, 1));
        assert!(can_occupy(&board, 1, 2));
        assert!(can_occupy(&board, 0, 1));
    }
}
