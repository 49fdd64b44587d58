//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key events
//! into [`crate::types::GameAction`] and keeps the soft-drop latch that turns held
//! keys into start/stop edges, including on terminals without key-release events.

pub mod handler;
pub mod map;

pub use tui_cascade_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_soft_drop_key, should_quit};
