//! Scoring module - points per cleared match group
//!
//! Every removed group adds its size to the score at the moment it is removed.
//! A cell shared by a horizontal and a vertical run is cleared once but counts
//! toward both groups, so atomic and staged cascades reach the same total.

/// Running score for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    groups: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one removed group; returns the points it was worth.
    pub fn add_group(&mut self, size: usize) -> u32 {
        let points = group_points(size);
        self.score = self.score.saturating_add(points);
        self.groups = self.groups.saturating_add(1);
        points
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of groups credited so far.
    pub fn groups(&self) -> u32 {
        self.groups
    }
}

/// Points for a group of `size` cells.
pub fn group_points(size: usize) -> u32 {
    u32::try_from(size).unwrap_or(u32::MAX)
}
