//! Game configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config:
//!
//! ```toml
//! columns = 13
//! rows = 20
//! identities = 13
//! natural_drop_ms = 1000
//! soft_drop_ms = 50
//! adjacency = "orthogonal"   # or "diagonal"
//! resolve_mode = "atomic"    # or "staged"
//! removal_delay_ms = 250
//! # seed = 12345
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::types::{
    Adjacency, ResolveMode, DEFAULT_COLUMNS, DEFAULT_IDENTITIES, DEFAULT_ROWS, MAX_IDENTITIES,
    NATURAL_DROP_MS, REMOVAL_DELAY_MS, SOFT_DROP_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    /// Number of distinct piece identities.
    pub identities: u8,
    pub natural_drop_ms: u32,
    pub soft_drop_ms: u32,
    #[serde(deserialize_with = "adjacency_from_str")]
    pub adjacency: Adjacency,
    #[serde(deserialize_with = "resolve_mode_from_str")]
    pub resolve_mode: ResolveMode,
    /// Pause between removals in staged mode.
    pub removal_delay_ms: u32,
    /// RNG seed; the frontend derives one from the clock when absent.
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            identities: DEFAULT_IDENTITIES,
            natural_drop_ms: NATURAL_DROP_MS,
            soft_drop_ms: SOFT_DROP_MS,
            adjacency: Adjacency::Orthogonal,
            resolve_mode: ResolveMode::Atomic,
            removal_delay_ms: REMOVAL_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 {
            return Err(ConfigError::Invalid(format!(
                "rows must be at least 2, got {}",
                self.rows
            )));
        }
        if self.columns < 1 {
            return Err(ConfigError::Invalid("columns must be at least 1".into()));
        }
        if self.identities == 0 || self.identities > MAX_IDENTITIES {
            return Err(ConfigError::Invalid(format!(
                "identities must be in 1..={MAX_IDENTITIES}, got {}",
                self.identities
            )));
        }
        if self.natural_drop_ms == 0 || self.soft_drop_ms == 0 {
            return Err(ConfigError::Invalid("drop periods must be positive".into()));
        }
        if self.soft_drop_ms > self.natural_drop_ms {
            return Err(ConfigError::Invalid(format!(
                "soft_drop_ms ({}) must not exceed natural_drop_ms ({})",
                self.soft_drop_ms, self.natural_drop_ms
            )));
        }
        Ok(())
    }

    /// Spawn column for new pieces (horizontally centered).
    pub fn spawn_col(&self) -> usize {
        self.columns / 2
    }
}

fn adjacency_from_str<'de, D: Deserializer<'de>>(de: D) -> Result<Adjacency, D::Error> {
    let raw = String::deserialize(de)?;
    Adjacency::from_str(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown adjacency {raw:?}, expected \"orthogonal\" or \"diagonal\""
        ))
    })
}

fn resolve_mode_from_str<'de, D: Deserializer<'de>>(de: D) -> Result<ResolveMode, D::Error> {
    let raw = String::deserialize(de)?;
    ResolveMode::from_str(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown resolve_mode {raw:?}, expected \"atomic\" or \"staged\""
        ))
    })
}
