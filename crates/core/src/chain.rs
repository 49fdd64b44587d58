//! Chain module - match detection and cascade resolution
//!
//! A match is a maximal run of three or more same-identity cells along one scan
//! direction. One resolution pass finds every match on the board, clears the
//! union of their cells, credits each group's size, and compacts the columns.
//! Passes repeat until one finds nothing (the fixpoint); that loop is the cascade.
//!
//! Two drivers share the matcher:
//!
//! - [`ChainResolver::resolve`] runs the whole cascade in one call.
//! - [`StagedCascade`] removes one group per [`StagedCascade::step`] so a caller
//!   can pace the removals. It reaches the same board and score.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::Board;
use crate::gravity;
use crate::scoring::ScoreTracker;
use crate::types::{Adjacency, Direction, Identity, Pos, MIN_RUN_LEN};

/// A maximal same-identity run of at least [`MIN_RUN_LEN`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub identity: Identity,
    pub direction: Direction,
    /// Cells in walk order, starting at the run start.
    pub cells: Vec<Pos>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Find all matches on `board`, in scan order (rows top-to-bottom, columns
/// left-to-right, directions in [`Adjacency::directions`] order).
///
/// Walks start only at true run starts, so each maximal run is reported once.
pub fn find_matches(board: &Board, adjacency: Adjacency) -> Vec<MatchGroup> {
    let mut groups = Vec::new();
    for (pos, identity) in board.occupied() {
        groups.extend(runs_from(board, pos, identity, adjacency.directions()));
    }
    groups
}

fn runs_from(
    board: &Board,
    start: Pos,
    identity: Identity,
    directions: &[Direction],
) -> ArrayVec<MatchGroup, 4> {
    let mut runs = ArrayVec::new();
    for &direction in directions.iter().take(4) {
        if !is_run_start(board, start, identity, direction) {
            continue;
        }
        let cells = walk(board, start, identity, direction);
        if cells.len() >= MIN_RUN_LEN {
            runs.push(MatchGroup {
                identity,
                direction,
                cells,
            });
        }
    }
    runs
}

/// A cell starts a run when the cell behind it is missing or different.
fn is_run_start(board: &Board, pos: Pos, identity: Identity, direction: Direction) -> bool {
    pos.step_back(direction)
        .and_then(|prev| board.identity_at(prev))
        != Some(identity)
}

fn walk(board: &Board, start: Pos, identity: Identity, direction: Direction) -> Vec<Pos> {
    let mut cells = vec![start];
    let mut cursor = start;
    while let Some(next) = cursor.step(direction) {
        if board.identity_at(next) != Some(identity) {
            break;
        }
        cells.push(next);
        cursor = next;
    }
    cells
}

/// Cells cleared and points credited by a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Removal {
    pub cleared: usize,
    pub points: u32,
}

/// Clear the union of `groups` and credit every group.
pub fn remove_groups(board: &mut Board, groups: &[MatchGroup], score: &mut ScoreTracker) -> Removal {
    let mut removal = Removal::default();
    for group in groups {
        removal.cleared += clear_cells(board, &group.cells);
        removal.points += score.add_group(group.len());
    }
    removal
}

fn clear_cells(board: &mut Board, cells: &[Pos]) -> usize {
    let mut cleared = 0;
    for &pos in cells {
        if board.is_occupied(pos) {
            board.put(pos, None);
            cleared += 1;
        }
    }
    cleared
}

/// Totals for one cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Resolution passes that found at least one match (the chain length).
    pub passes: u32,
    pub groups: u32,
    pub cleared: usize,
    pub points: u32,
}

impl CascadeReport {
    pub fn is_empty(&self) -> bool {
        self.passes == 0
    }
}

/// Atomic cascade driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChainResolver {
    adjacency: Adjacency,
}

impl ChainResolver {
    pub fn new(adjacency: Adjacency) -> Self {
        Self { adjacency }
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// One resolution pass: match, remove, compact. Returns None at the fixpoint.
    pub fn pass(&self, board: &mut Board, score: &mut ScoreTracker) -> Option<(usize, Removal)> {
        let groups = find_matches(board, self.adjacency);
        if groups.is_empty() {
            return None;
        }
        let removal = remove_groups(board, &groups, score);
        gravity::compact(board);
        Some((groups.len(), removal))
    }

    /// Run passes until the board reaches its fixpoint.
    ///
    /// Every productive pass clears at least three cells, so the loop is bounded
    /// by the occupied-cell count.
    pub fn resolve(&self, board: &mut Board, score: &mut ScoreTracker) -> CascadeReport {
        let mut report = CascadeReport::default();
        while let Some((groups, removal)) = self.pass(board, score) {
            report.passes += 1;
            report.groups += groups as u32;
            report.cleared += removal.cleared;
            report.points += removal.points;
            debug!(
                pass = report.passes,
                groups,
                cleared = removal.cleared,
                points = removal.points,
                "cascade pass"
            );
        }
        report
    }
}

/// Result of one staged step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// One group was removed and gravity applied.
    Removed(Removal),
    /// Fixpoint reached; nothing changed.
    Settled,
}

#[derive(Debug, Clone)]
struct PendingGroup {
    /// Full size at detection time; this is what gets scored.
    size: usize,
    /// Cells not yet cleared, tracked through compactions.
    cells: Vec<Pos>,
}

/// Cascade driver that removes one group per step.
///
/// A pass's groups are queued when it is scanned. Each step clears one queued
/// group, compacts, and carries the remaining groups' coordinates through the
/// compaction. The board is only rescanned once the queue is empty, so the
/// outcome matches [`ChainResolver::resolve`] on the same board.
#[derive(Debug, Clone)]
pub struct StagedCascade {
    adjacency: Adjacency,
    pending: VecDeque<PendingGroup>,
    report: CascadeReport,
}

impl StagedCascade {
    pub fn new(adjacency: Adjacency) -> Self {
        Self {
            adjacency,
            pending: VecDeque::new(),
            report: CascadeReport::default(),
        }
    }

    /// Groups still queued from the current pass.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn report(&self) -> CascadeReport {
        self.report
    }

    pub fn step(&mut self, board: &mut Board, score: &mut ScoreTracker) -> CascadeStep {
        if self.pending.is_empty() {
            let groups = find_matches(board, self.adjacency);
            if groups.is_empty() {
                return CascadeStep::Settled;
            }
            self.report.passes += 1;
            self.pending = groups
                .into_iter()
                .map(|g| PendingGroup {
                    size: g.len(),
                    cells: g.cells,
                })
                .collect();
        }

        let Some(group) = self.pending.pop_front() else {
            return CascadeStep::Settled;
        };

        let removal = Removal {
            cleared: clear_cells(board, &group.cells),
            points: score.add_group(group.size),
        };

        for queued in self.pending.iter_mut() {
            queued.cells.retain(|&pos| board.is_occupied(pos));
        }
        let compaction = gravity::compact(board);
        if !compaction.is_noop() {
            for queued in self.pending.iter_mut() {
                for pos in queued.cells.iter_mut() {
                    *pos = compaction.remap(*pos);
                }
            }
        }

        self.report.groups += 1;
        self.report.cleared += removal.cleared;
        self.report.points += removal.points;
        debug!(
            pass = self.report.passes,
            remaining = self.pending.len(),
            cleared = removal.cleared,
            points = removal.points,
            "staged removal"
        );

        CascadeStep::Removed(removal)
    }

    /// Drive the cascade to its fixpoint without pacing.
    pub fn run_to_fixpoint(&mut self, board: &mut Board, score: &mut ScoreTracker) -> CascadeReport {
        while let CascadeStep::Removed(_) = self.step(board, score) {}
        self.report
    }
}
