//! Terminal frontend for the cascade puzzle.
//!
//! A small, game-oriented rendering layer: the [`GameView`] draws a
//! [`crate::core::GameSnapshot`] into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] sends only the changed cells to the terminal.
//! Board cells are two terminal columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use tui_cascade_core as core;
pub use tui_cascade_engine as engine;
pub use tui_cascade_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{GameView, Viewport};
pub use palette::{Palette, Swatch};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
