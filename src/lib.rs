//! Terminal cascade puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_cascade::{core,engine,input,term,types}` and hosts the
//! binary, the integration tests and the benches.

pub use tui_cascade_core as core;
pub use tui_cascade_engine as engine;
pub use tui_cascade_input as input;
pub use tui_cascade_term as term;
pub use tui_cascade_types as types;
