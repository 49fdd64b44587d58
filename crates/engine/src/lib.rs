//! Timing and orchestration for the cascade puzzle.
//!
//! - [`scheduler`]: the [`Scheduler`] capability and the virtual-clock [`TimerQueue`]
//! - [`drop`]: [`DropScheduler`], the single natural/soft fall timer
//! - [`readiness`]: [`ReadinessGate`], the one-time start barrier
//! - [`engine`]: [`GameEngine`], the piece lifecycle state machine
//!
//! # Example
//!
//! ```
//! use tui_cascade_core::{GameConfig, SequenceSource};
//! use tui_cascade_engine::{GameEngine, ReadinessGate};
//! use tui_cascade_types::{Identity, Phase};
//!
//! let config = GameConfig { rows: 4, columns: 3, identities: 2, ..GameConfig::default() };
//! let mut engine = GameEngine::new(config, SequenceSource::new([0, 1])).unwrap();
//!
//! let mut gate = ReadinessGate::new(2);
//! assert!(engine.start(&gate).is_err());
//! gate.mark_ready(Identity::new(0));
//! gate.mark_ready(Identity::new(1));
//! engine.start(&gate).unwrap();
//!
//! // Three natural periods take the piece to the floor, the fourth fixes it.
//! engine.tick(4 * 1000);
//! assert_eq!(engine.board().occupied_count(), 1);
//! assert_eq!(engine.phase(), Phase::Falling);
//! ```

pub mod drop;
pub mod engine;
pub mod error;
pub mod observer;
pub mod readiness;
pub mod scheduler;

pub use tui_cascade_core as core;
pub use tui_cascade_types as types;

pub use drop::DropScheduler;
pub use engine::GameEngine;
pub use error::EngineError;
pub use observer::EngineObserver;
pub use readiness::ReadinessGate;
pub use scheduler::{Scheduler, TimerHandle, TimerKind, TimerQueue};
