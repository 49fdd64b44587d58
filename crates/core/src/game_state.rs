//! Game state module - the single mutable value a game runs on
//!
//! `GameState` owns the board, the spawner (with its random source), the active
//! piece, the score and the lifecycle phase. Timing lives in the engine crate; this
//! module only provides the state transitions it drives:
//!
//! - lateral moves and one-row advances, gated by [`crate::collision::can_occupy`]
//! - fixing the active piece into the board
//! - cascade resolution (atomic, or one staged step at a time)
//! - the game-over check and promotion of the next piece
//!
//! Once the phase is [`Phase::GameOver`] every mutator is a no-op; a fresh
//! `GameState` is built on reset.

use tracing::warn;

use crate::board::Board;
use crate::chain::{CascadeReport, CascadeStep, ChainResolver, StagedCascade};
use crate::collision::can_occupy;
use crate::config::GameConfig;
use crate::error::BoardError;
use crate::rng::RandomSource;
use crate::scoring::ScoreTracker;
use crate::snapshot::GameSnapshot;
use crate::spawner::{ActivePiece, PieceSpawner};
use crate::types::{Phase, Pos};

/// Outcome of trying to move the active piece down one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// The cell below is the floor or occupied; the piece should be fixed.
    Blocked,
    /// No falling piece (wrong phase).
    Idle,
}

#[derive(Debug, Clone)]
pub struct GameState<R> {
    board: Board,
    spawner: PieceSpawner<R>,
    active: Option<ActivePiece>,
    score: ScoreTracker,
    phase: Phase,
    resolver: ChainResolver,
    last_cascade: CascadeReport,
}

impl<R: RandomSource> GameState<R> {
    /// Fresh game: empty board, first piece waiting at the spawn cell.
    pub fn new(config: &GameConfig, rng: R) -> Self {
        let spawner = PieceSpawner::new(rng, config.identities, config.columns);
        Self {
            board: Board::new(config.rows, config.columns),
            active: Some(spawner.current()),
            spawner,
            score: ScoreTracker::new(),
            phase: Phase::Idle,
            resolver: ChainResolver::new(config.adjacency),
            last_cascade: CascadeReport::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> ActivePiece {
        self.spawner.next()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn groups_cleared(&self) -> u32 {
        self.score.groups()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn last_cascade(&self) -> CascadeReport {
        self.last_cascade
    }

    pub fn resolver(&self) -> ChainResolver {
        self.resolver
    }

    pub fn spawner(&self) -> &PieceSpawner<R> {
        &self.spawner
    }

    /// Move to `phase`. Leaving `GameOver` is refused.
    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = phase;
    }

    /// Swap in a preset board of the same dimensions that leaves the active
    /// piece's cell free.
    pub fn replace_board(&mut self, board: Board) -> bool {
        if self.game_over()
            || board.rows() != self.board.rows()
            || board.columns() != self.board.columns()
        {
            return false;
        }
        if let Some(active) = self.active {
            if !can_occupy(&board, active.row, active.col) {
                return false;
            }
        }
        self.board = board;
        true
    }

    /// Shift the falling piece sideways by `d_col`. Blocked moves change nothing.
    pub fn try_shift(&mut self, d_col: i32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let target = active.shifted(0, d_col);
        if !can_occupy(&self.board, target.row, target.col) {
            return false;
        }
        self.active = Some(target);
        true
    }

    /// Move the falling piece down one row if the cell below is free.
    pub fn try_advance(&mut self) -> Advance {
        if self.phase != Phase::Falling {
            return Advance::Idle;
        }
        let Some(active) = self.active else {
            return Advance::Idle;
        };
        let target = active.shifted(1, 0);
        if can_occupy(&self.board, target.row, target.col) {
            self.active = Some(target);
            Advance::Moved
        } else {
            Advance::Blocked
        }
    }

    /// Write the active piece into the board at its current cell.
    ///
    /// The piece is consumed even when the write fails, so the lifecycle can
    /// continue to the game-over check.
    pub fn fix_active(&mut self) -> Result<Option<Pos>, BoardError> {
        if self.game_over() {
            return Ok(None);
        }
        let Some(active) = self.active.take() else {
            return Ok(None);
        };
        self.phase = Phase::Fixing;

        let (Ok(row), Ok(col)) = (usize::try_from(active.row), usize::try_from(active.col)) else {
            warn!(row = active.row, col = active.col, "active piece is above the board");
            return Ok(None);
        };
        self.board.set(row, col, Some(active.identity))?;
        Ok(Some(Pos::new(row, col)))
    }

    /// Run the cascade to its fixpoint in one call.
    pub fn resolve(&mut self) -> CascadeReport {
        if self.game_over() {
            return CascadeReport::default();
        }
        self.phase = Phase::Resolving;
        let report = self.resolver.resolve(&mut self.board, &mut self.score);
        self.last_cascade = report;
        report
    }

    /// Apply one staged cascade step.
    pub fn resolve_step(&mut self, staged: &mut StagedCascade) -> CascadeStep {
        if self.game_over() {
            return CascadeStep::Settled;
        }
        self.phase = Phase::Resolving;
        let step = staged.step(&mut self.board, &mut self.score);
        self.last_cascade = staged.report();
        step
    }

    /// Enter `GameOver` if the top row is occupied. Returns whether the game is over.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over() {
            return true;
        }
        self.phase = Phase::CheckingGameOver;
        if self.board.top_row_occupied() {
            self.phase = Phase::GameOver;
            self.active = None;
            return true;
        }
        false
    }

    /// Promote the lookahead piece to active and draw a new lookahead.
    pub fn promote_next(&mut self) -> Option<ActivePiece> {
        if self.game_over() {
            return None;
        }
        self.phase = Phase::Spawning;
        let piece = self.spawner.advance();
        self.active = Some(piece);
        Some(piece)
    }

    /// Row the active piece would come to rest on.
    pub fn landing_row(&self) -> Option<i32> {
        let active = self.active?;
        let mut row = active.row;
        while can_occupy(&self.board, row + 1, active.col) {
            row += 1;
        }
        Some(row)
    }

    /// Fill the state-owned fields of `out`, reusing its board allocation.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.active = self.active;
        out.ghost_row = self.landing_row();
        out.next = self.spawner.next();
        out.score = self.score.score();
        out.groups_cleared = self.score.groups();
        out.phase = self.phase;
        out.chain = self.last_cascade.passes;
    }
}
