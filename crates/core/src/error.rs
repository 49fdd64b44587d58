//! Error types for the core crate.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Misuse of the board accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// `(row, col)` lies outside `[0, rows) × [0, columns)`.
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    /// A textual layout could not be parsed.
    InvalidLayout(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                rows,
                columns,
            } => write!(
                f,
                "cell ({row}, {col}) is outside the {rows}x{columns} board"
            ),
            Self::InvalidLayout(reason) => write!(f, "invalid board layout: {reason}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Failure to load or validate a [`crate::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
