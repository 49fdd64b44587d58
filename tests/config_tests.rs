//! Loading `GameConfig` from disk.

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};
use tui_cascade::core::{ConfigError, GameConfig};
use tui_cascade::types::{Adjacency, ResolveMode, DEFAULT_COLUMNS};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
columns = 7
rows = 12
identities = 5
natural_drop_ms = 800
soft_drop_ms = 40
adjacency = "diagonal"
resolve_mode = "staged"
removal_delay_ms = 120
seed = 99
"#,
    );
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.columns, 7);
    assert_eq!(config.rows, 12);
    assert_eq!(config.identities, 5);
    assert_eq!(config.natural_drop_ms, 800);
    assert_eq!(config.soft_drop_ms, 40);
    assert_eq!(config.adjacency, Adjacency::Diagonal);
    assert_eq!(config.resolve_mode, ResolveMode::Staged);
    assert_eq!(config.removal_delay_ms, 120);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.spawn_col(), 3);
}

#[test]
fn test_partial_config_uses_defaults() {
    let file = write_config("rows = 8\n");
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.rows, 8);
    assert_eq!(config.columns, DEFAULT_COLUMNS);
    assert_eq!(config.seed, None);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = GameConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let file = write_config("rows = \n");
    assert!(matches!(
        GameConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_unknown_keys_and_values_rejected() {
    let file = write_config("speed = 3\n");
    assert!(matches!(
        GameConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
    let file = write_config("adjacency = \"hex\"\n");
    assert!(matches!(
        GameConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_out_of_range_values_rejected() {
    for contents in [
        "rows = 1\n",
        "columns = 0\n",
        "identities = 0\n",
        "identities = 27\n",
        "soft_drop_ms = 0\n",
        "natural_drop_ms = 40\nsoft_drop_ms = 50\n",
    ] {
        let file = write_config(contents);
        assert!(
            matches!(GameConfig::load(file.path()), Err(ConfigError::Invalid(_))),
            "{contents:?} should be rejected"
        );
    }
}
