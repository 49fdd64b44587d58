//! Board, collision and gravity tests

use tui_cascade::core::{can_occupy, compact, find_matches, Board, BoardError, ChainResolver, ScoreTracker};
use tui_cascade::types::{Adjacency, Identity, Pos};

fn board(rows: &[&str]) -> Board {
    Board::from_rows(rows).unwrap()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(20, 13);
    assert_eq!(board.rows(), 20);
    assert_eq!(board.columns(), 13);
    for row in 0..20 {
        for col in 0..13 {
            assert_eq!(board.get(row, col), Ok(None), "cell ({row}, {col}) should be empty");
        }
    }
    assert!(!board.top_row_occupied());
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new(5, 4);
    assert_eq!(
        board.get(5, 0),
        Err(BoardError::OutOfBounds {
            row: 5,
            col: 0,
            rows: 5,
            columns: 4
        })
    );
    assert!(board.get(0, 4).is_err());
    assert!(board.set(0, 4, Some(Identity::new(0))).is_err());
    assert!(board.is_empty());
}

#[test]
fn test_board_set_touches_one_cell() {
    let mut board = Board::new(3, 3);
    board.set(1, 2, Some(Identity::new(4))).unwrap();
    assert_eq!(board.occupied_count(), 1);
    assert_eq!(board.get(1, 2), Ok(Some(Identity::new(4))));
    board.set(1, 2, None).unwrap();
    assert!(board.is_empty());
}

#[test]
fn test_top_row_detection() {
    assert!(board(&["..A", "..."]).top_row_occupied());
    assert!(!board(&["...", "AAA"]).top_row_occupied());
}

#[test]
fn test_text_layout_round_trip_and_errors() {
    let rows = ["A.C", ".B."];
    assert_eq!(board(&rows).to_rows(), rows);
    assert!(matches!(
        Board::from_rows(&["AB", "A"]),
        Err(BoardError::InvalidLayout(_))
    ));
    assert!(matches!(
        Board::from_rows(&["a."]),
        Err(BoardError::InvalidLayout(_))
    ));
}

#[test]
fn test_collision_rules() {
    let b = board(&["...", ".A.", "..."]);
    // Above the board is always open.
    assert!(can_occupy(&b, -1, 1));
    assert!(can_occupy(&b, 0, 1));
    assert!(!can_occupy(&b, 1, 1));
    // Floor and walls.
    assert!(!can_occupy(&b, 3, 0));
    assert!(!can_occupy(&b, 0, -1));
    assert!(!can_occupy(&b, 0, 3));
    assert!(!can_occupy(&b, -1, 3));
}

#[test]
fn test_gravity_is_per_column_and_idempotent() {
    let mut b = board(&["AB.", "..C", "A..", "..."]);
    compact(&mut b);
    assert_eq!(b.to_rows(), vec!["...", "...", "A..", "ABC"]);
    let again = compact(&mut b);
    assert!(again.is_noop());
}

#[test]
fn test_pairs_never_match() {
    let b = board(&["AA.B", "..BA", "CC.A", "C..."]);
    assert!(find_matches(&b, Adjacency::Diagonal).is_empty());
    let mut resolved = b.clone();
    let report = ChainResolver::new(Adjacency::Diagonal).resolve(&mut resolved, &mut ScoreTracker::new());
    assert!(report.is_empty());
    assert_eq!(resolved, b);
}

#[test]
fn test_match_cells_are_contiguous_and_ordered() {
    let b = board(&["....", ".BBB", "...."]);
    let groups = find_matches(&b, Adjacency::Orthogonal);
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].cells,
        vec![Pos::new(1, 1), Pos::new(1, 2), Pos::new(1, 3)]
    );
}

#[test]
fn test_row_out_of_range_is_none() {
    let b = board(&["AB", ".."]);
    assert!(b.row(1).is_some());
    assert!(b.row(2).is_none());
    assert!(!Board::new(0, 4).top_row_occupied());
}
