//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary used by every other crate in the workspace.
//! All types are plain data with no external dependencies, so they can be used by
//! the board logic, the timing engine and the terminal frontend alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 13 columns by 20 rows:
//!
//! - **Columns**: indexed `0..13`, left to right
//! - **Rows**: indexed `0..20`, top to bottom (row 0 is the spawn row)
//! - **Spawn position**: `(row 0, column / 2)`
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frontend fixed timestep (~60 FPS) |
//! | `NATURAL_DROP_MS` | 1000 | Natural fall period |
//! | `SOFT_DROP_MS` | 50 | Accelerated (soft drop) fall period |
//! | `REMOVAL_DELAY_MS` | 250 | Pause between staged group removals |
//! | `SOFT_DROP_RELEASE_TIMEOUT_MS` | 150 | Soft drop latch timeout without key repeats |
//!
//! # Examples
//!
//! ```
//! use tui_cascade_types::{Adjacency, Direction, GameAction, Identity};
//!
//! let a = Identity::from_letter('A').unwrap();
//! assert_eq!(a.index(), 0);
//! assert_eq!(a.letter(), 'A');
//!
//! assert_eq!(Adjacency::from_str("diagonal"), Some(Adjacency::Diagonal));
//! assert_eq!(Adjacency::Orthogonal.directions(), &[Direction::Right, Direction::Down]);
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! ```

use std::fmt;

/// Default board width in cells.
pub const DEFAULT_COLUMNS: usize = 13;

/// Default board height in cells.
pub const DEFAULT_ROWS: usize = 20;

/// Default number of distinct piece identities.
pub const DEFAULT_IDENTITIES: u8 = 13;

/// Largest supported identity count (one letter per identity).
pub const MAX_IDENTITIES: u8 = 26;

/// Minimum run length that clears.
pub const MIN_RUN_LEN: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Natural fall period in milliseconds.
pub const NATURAL_DROP_MS: u32 = 1000;

/// Soft drop fall period in milliseconds.
pub const SOFT_DROP_MS: u32 = 50;

/// Delay between removal steps of a staged cascade.
pub const REMOVAL_DELAY_MS: u32 = 250;

/// Terminals without key-release events end the soft drop after this long without a repeat.
pub const SOFT_DROP_RELEASE_TIMEOUT_MS: u32 = 150;

/// Identity of a piece, in `0..identities`.
///
/// Identities render as letters (`A` = 0) in textual board layouts and in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(u8);

impl Identity {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Parse an uppercase letter (`'A'..='Z'`).
    pub fn from_letter(ch: char) -> Option<Self> {
        if ch.is_ascii_uppercase() {
            Some(Self(ch as u8 - b'A'))
        } else {
            None
        }
    }

    /// Letter used for textual layouts. Identities past `Z` render as `?`.
    pub fn letter(self) -> char {
        if self.0 < MAX_IDENTITIES {
            (b'A' + self.0) as char
        } else {
            '?'
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Cell on the board (None = empty, Some = settled piece of that identity)
pub type Cell = Option<Identity>;

/// Board coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step one cell along `dir`. Returns None when the step leaves the
    /// non-negative quadrant; the upper bounds are the board's concern.
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Pos { row, col })
    }

    /// Step one cell against `dir`.
    pub fn step_back(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(-dr)?;
        let col = self.col.checked_add_signed(-dc)?;
        Some(Pos { row, col })
    }
}

/// Scan directions for run detection.
///
/// Only forward directions are listed; a run is always walked from its
/// top/left end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// →
    Right,
    /// ↓
    Down,
    /// ↘
    DownRight,
    /// ↙
    DownLeft,
}

impl Direction {
    /// `(row delta, column delta)`
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::DownRight => "downRight",
            Direction::DownLeft => "downLeft",
        }
    }
}

/// Which run directions count as a match.
///
/// The grid model is the only adjacency model: two cells are adjacent when
/// their coordinates differ by one step along a listed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Adjacency {
    /// Horizontal and vertical runs.
    #[default]
    Orthogonal,
    /// Horizontal, vertical and both diagonal runs.
    Diagonal,
}

impl Adjacency {
    pub fn directions(self) -> &'static [Direction] {
        const ORTHOGONAL: [Direction; 2] = [Direction::Right, Direction::Down];
        const DIAGONAL: [Direction; 4] = [
            Direction::Right,
            Direction::Down,
            Direction::DownRight,
            Direction::DownLeft,
        ];
        match self {
            Adjacency::Orthogonal => &ORTHOGONAL,
            Adjacency::Diagonal => &DIAGONAL,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "orthogonal" => Some(Adjacency::Orthogonal),
            "diagonal" => Some(Adjacency::Diagonal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Adjacency::Orthogonal => "orthogonal",
            Adjacency::Diagonal => "diagonal",
        }
    }
}

/// How a cascade is applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolveMode {
    /// Run the whole cascade to its fixpoint in one call.
    #[default]
    Atomic,
    /// Remove one match group per scheduled step.
    Staged,
}

impl ResolveMode {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "atomic" => Some(ResolveMode::Atomic),
            "staged" => Some(ResolveMode::Staged),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveMode::Atomic => "atomic",
            ResolveMode::Staged => "staged",
        }
    }
}

/// Fall cadence of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropMode {
    #[default]
    Natural,
    Accelerated,
}

/// Piece lifecycle phase.
///
/// `Idle → Falling → Fixing → Resolving → CheckingGameOver → (Spawning → Falling | GameOver)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, waiting for `start()`.
    #[default]
    Idle,
    Spawning,
    Falling,
    Fixing,
    Resolving,
    CheckingGameOver,
    /// Terminal until reset.
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Fixing => "fixing",
            Phase::Resolving => "resolving",
            Phase::CheckingGameOver => "checkingGameOver",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Game actions that can be applied to the engine
///
/// Soft drop is edge-triggered: the frontend reports when it starts and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Switch to the accelerated fall period
    SoftDropStart,
    /// Switch back to the natural fall period
    SoftDropEnd,
    /// Discard the current game and start a fresh one
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropend" => Some(GameAction::SoftDropEnd),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropEnd => "softDropEnd",
            GameAction::Restart => "restart",
        }
    }
}
