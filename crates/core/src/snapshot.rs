use crate::board::Board;
use crate::spawner::ActivePiece;
use crate::types::{DropMode, Identity, Phase};

/// Read-only view of a game for renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    /// Row the active piece would land on if it dropped now.
    pub ghost_row: Option<i32>,
    pub next: ActivePiece,
    pub phase: Phase,
    pub drop_mode: DropMode,
    pub score: u32,
    pub best_score: u32,
    pub groups_cleared: u32,
    /// Passes in the latest cascade.
    pub chain: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            board: Board::new(rows, columns),
            active: None,
            ghost_row: None,
            next: ActivePiece::new(Identity::new(0), 0, (columns / 2) as i32),
            phase: Phase::Idle,
            drop_mode: DropMode::Natural,
            score: 0,
            best_score: 0,
            groups_cleared: 0,
            chain: 0,
            episode_id: 0,
        }
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}
