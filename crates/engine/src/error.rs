use std::error::Error;
use std::fmt;

use crate::core::ConfigError;
use crate::types::Phase;

#[derive(Debug)]
pub enum EngineError {
    /// `start()` was called before every identity was ready.
    NotReady { remaining: usize },
    Config(ConfigError),
    /// A preset board does not match the configured dimensions.
    BoardMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The readiness gate tracks a different identity count than the config.
    GateMismatch { expected: usize, found: usize },
    /// A preset board can only be loaded while a piece is falling or before start.
    Busy(Phase),
    /// A preset board has a settled cell under the active piece.
    ActiveOverlap { row: usize, col: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady { remaining } => {
                write!(f, "cannot start: {remaining} identities not ready")
            }
            Self::Config(err) => write!(f, "engine config: {err}"),
            Self::BoardMismatch { expected, found } => write!(
                f,
                "board is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::GateMismatch { expected, found } => write!(
                f,
                "readiness gate covers {found} identities, expected {expected}"
            ),
            Self::Busy(phase) => write!(f, "cannot load a board while {phase:?}"),
            Self::ActiveOverlap { row, col } => {
                write!(f, "board cell ({row}, {col}) is under the active piece")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}
