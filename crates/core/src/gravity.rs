//! Gravity compaction.
//!
//! After removals every column is re-packed downward independently: occupied
//! cells keep their top-to-bottom order and land bottom-aligned, the rest of the
//! column is cleared. Compacting an already compact board changes nothing.

use crate::board::Board;
use crate::types::Pos;

/// A cell that moved during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

/// Record of one compaction, used to follow cells through gravity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compaction {
    moves: Vec<Move>,
}

impl Compaction {
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Nothing fell.
    pub fn is_noop(&self) -> bool {
        self.moves.is_empty()
    }

    /// Where the cell that was at `pos` sits now. Cells that did not move map
    /// to themselves.
    pub fn remap(&self, pos: Pos) -> Pos {
        self.moves
            .iter()
            .find(|m| m.from == pos)
            .map_or(pos, |m| m.to)
    }
}

/// Compact every column of `board`.
pub fn compact(board: &mut Board) -> Compaction {
    let mut compaction = Compaction::default();
    for col in 0..board.columns() {
        compact_column(board, col, &mut compaction.moves);
    }
    compaction
}

/// Two-pointer pass from the bottom: each occupied cell is written to the lowest
/// free slot below it, then the slots above the write pointer are cleared.
fn compact_column(board: &mut Board, col: usize, moves: &mut Vec<Move>) {
    let mut write_row = board.rows();

    for read_row in (0..board.rows()).rev() {
        let from = Pos::new(read_row, col);
        let Some(identity) = board.identity_at(from) else {
            continue;
        };
        write_row -= 1;
        if write_row != read_row {
            let to = Pos::new(write_row, col);
            board.put(to, Some(identity));
            board.put(from, None);
            moves.push(Move { from, to });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_columns_bottom_aligned_in_order() {
        let mut board = Board::from_rows(&["A.C", ".B.", "B..", "..C", "C.."]).unwrap();
        let compaction = compact(&mut board);
        assert_eq!(board.to_rows(), ["...", "...", "A..", "B.C", "CBC"]);
        assert_eq!(compaction.moves().len(), 5);
    }

    #[test]
    fn second_pass_is_a_noop() {
        let mut board = Board::from_rows(&["AB.", "...", "..C", "A.."]).unwrap();
        compact(&mut board);
        let once = board.clone();
        let again = compact(&mut board);
        assert!(again.is_noop());
        assert_eq!(board, once);
    }

    #[test]
    fn remap_follows_fallen_cells() {
        let mut board = Board::from_rows(&["A", ".", "B", "."]).unwrap();
        let compaction = compact(&mut board);
        assert_eq!(compaction.remap(Pos::new(0, 0)), Pos::new(2, 0));
        assert_eq!(compaction.remap(Pos::new(2, 0)), Pos::new(3, 0));
        assert_eq!(compaction.remap(Pos::new(1, 0)), Pos::new(1, 0));
        assert_eq!(board.to_rows(), [".", ".", "A", "B"]);
    }
}
