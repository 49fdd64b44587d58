//! Board module - manages the game grid
//!
//! The board is a `rows × columns` grid where each cell is empty or holds a settled
//! piece identity. Uses a flat row-major vector; dimensions are fixed at construction.
//! Coordinates are `(row, col)` with row 0 at the top (the spawn row).

use std::fmt;

use crate::error::BoardError;
use crate::types::{Cell, Identity, Pos};

/// The settled-piece grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    /// Parse a board from text rows, top row first.
    ///
    /// `.` is an empty cell and `A`..`Z` are identities 0..25.
    ///
    /// ```
    /// use tui_cascade_core::Board;
    ///
    /// let board = Board::from_rows(&["..", "AB"]).unwrap();
    /// assert_eq!(board.rows(), 2);
    /// assert!(board.get(1, 1).unwrap().is_some());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let Some(first) = rows.first() else {
            return Err(BoardError::InvalidLayout("no rows".into()));
        };
        let columns = first.chars().count();
        let mut board = Board::new(rows.len(), columns);

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(BoardError::InvalidLayout(format!(
                    "row {row} has {} cells, expected {columns}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(Identity::from_letter(other).ok_or_else(|| {
                        BoardError::InvalidLayout(format!("unexpected {other:?} at ({row}, {col})"))
                    })?),
                };
                board.cells[row * columns + col] = cell;
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(row * self.columns + col)
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> BoardError {
        BoardError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Get the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Set the cell at `(row, col)`. Only the addressed cell changes.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let idx = self
            .index(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Write a cell the caller just read from this board. Out-of-range
    /// positions are ignored.
    pub(crate) fn put(&mut self, pos: Pos, cell: Cell) {
        if let Some(idx) = self.index(pos.row, pos.col) {
            self.cells[idx] = cell;
        }
    }

    /// Lookup that treats out-of-bounds as "no cell here".
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.index(pos.row, pos.col).map(|idx| self.cells[idx])
    }

    /// Identity at `pos`, if in bounds and occupied.
    pub fn identity_at(&self, pos: Pos) -> Option<Identity> {
        self.cell(pos).flatten()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos.row, pos.col).is_some()
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.identity_at(pos).is_some()
    }

    /// Game over condition: anything settled in row 0.
    pub fn top_row_occupied(&self) -> bool {
        self.cells
            .iter()
            .take(self.columns)
            .any(|cell| cell.is_some())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row as a slice, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        self.cells.get(start..start + self.columns)
    }

    /// Iterate occupied cells in scan order (top-to-bottom, left-to-right).
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Identity)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|id| (Pos::new(idx / self.columns, idx % self.columns), id))
        })
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Text rows in the same format [`Board::from_rows`] accepts.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.columns.max(1))
            .take(self.rows)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Identity::letter))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_rows() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(5, 4);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 3), Some(3));
        assert_eq!(board.index(1, 0), Some(4));
        assert_eq!(board.index(4, 3), Some(19));
        assert_eq!(board.index(0, 4), None);
        assert_eq!(board.index(5, 0), None);
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut board = Board::new(5, 4);
        let a = Identity::new(0);

        assert_eq!(board.get(2, 1), Ok(None));
        board.set(2, 1, Some(a)).unwrap();
        assert_eq!(board.get(2, 1), Ok(Some(a)));
        assert_eq!(board.cells()[2 * 4 + 1], Some(a));

        assert!(matches!(
            board.get(5, 0),
            Err(BoardError::OutOfBounds { row: 5, col: 0, .. })
        ));
        assert!(board.set(0, 4, Some(a)).is_err());
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_top_row_occupied() {
        let mut board = Board::new(3, 3);
        assert!(!board.top_row_occupied());
        board.set(1, 1, Some(Identity::new(2))).unwrap();
        assert!(!board.top_row_occupied());
        board.set(0, 2, Some(Identity::new(2))).unwrap();
        assert!(board.top_row_occupied());
    }

    #[test]
    fn test_degenerate_board_does_not_panic() {
        let board = Board::new(0, 3);
        assert!(!board.top_row_occupied());
        assert!(board.row(0).is_none());
        assert!(board.to_rows().is_empty());
    }

    #[test]
    fn test_row_access() {
        let board = Board::from_rows(&["A..", ".B."]).unwrap();
        assert_eq!(board.row(1), Some(&[None, Some(Identity::new(1)), None][..]));
        assert!(board.row(2).is_none());
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = ["...", ".B.", "AAC"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.columns(), 3);
        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.to_string(), "...\n.B.\nAAC\n");
    }

    #[test]
    fn test_from_rows_rejects_bad_layouts() {
        assert!(Board::from_rows(&[]).is_err());
        assert!(Board::from_rows(&["..", "..."]).is_err());
        assert!(Board::from_rows(&["a."]).is_err());
    }

    #[test]
    fn test_occupied_scan_order() {
        let board = Board::from_rows(&[".A", "B."]).unwrap();
        let cells: Vec<_> = board.occupied().collect();
        assert_eq!(
            cells,
            vec![
                (Pos::new(0, 1), Identity::new(0)),
                (Pos::new(1, 0), Identity::new(1)),
            ]
        );
    }
}
