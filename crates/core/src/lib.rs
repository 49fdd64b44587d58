//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the cascade puzzle: the board, collision, match
//! detection, gravity, scoring and the mutable [`GameState`]. It has no timers and
//! no I/O; the engine crate drives it.
//!
//! # Module Structure
//!
//! - [`board`]: rows x columns grid of optional identities
//! - [`collision`]: can a piece occupy a cell
//! - [`chain`]: match detection, atomic and staged cascade resolution
//! - [`gravity`]: per-column compaction
//! - [`scoring`]: one point per cell of every removed group
//! - [`spawner`]: random pieces with a one-piece lookahead
//! - [`game_state`]: the state a game runs on
//! - [`config`]: TOML-backed [`GameConfig`]
//!
//! # Rules
//!
//! - Pieces are single cells that spawn on row 0 at column `columns / 2`.
//! - A match is a straight run of three or more equal identities; diagonal runs
//!   count only with [`types::Adjacency::Diagonal`].
//! - After every removal, occupied cells fall to the bottom of their column and
//!   the board is scanned again until nothing matches.
//! - The game ends when a cascade settles with anything left on the top row.
//!
//! # Example
//!
//! ```
//! use tui_cascade_core::{Board, ChainResolver, ScoreTracker};
//! use tui_cascade_core::types::Adjacency;
//!
//! let mut board = Board::from_rows(&["A...", "BBB.", "AA.A"]).unwrap();
//! let mut score = ScoreTracker::new();
//! let report = ChainResolver::new(Adjacency::Orthogonal).resolve(&mut board, &mut score);
//!
//! assert_eq!(report.passes, 1);
//! assert_eq!(score.score(), 3);
//! assert_eq!(board.to_rows(), vec!["....", "A...", "AA.A"]);
//! ```

pub mod board;
pub mod chain;
pub mod collision;
pub mod config;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use tui_cascade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use chain::{
    find_matches, CascadeReport, CascadeStep, ChainResolver, MatchGroup, Removal, StagedCascade,
};
pub use collision::can_occupy;
pub use config::GameConfig;
pub use error::{BoardError, ConfigError};
pub use game_state::{Advance, GameState};
pub use gravity::{compact, Compaction};
pub use rng::{RandomSource, SequenceSource, SimpleRng};
pub use scoring::ScoreTracker;
pub use snapshot::GameSnapshot;
pub use spawner::{ActivePiece, PieceSpawner};
