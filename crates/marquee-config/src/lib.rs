//! Configuration parsing and validation for marquee
//!
//! A single flat TOML table; every field is optional and defaults are
//! applied field-wise, so an absent file behaves the same as an empty one:
//!
//! ```toml
//! catalog = "/home/player/games.csv"
//! columns = 5
//! deny = ["asciijump.desktop"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tiles per grid row
pub const DEFAULT_COLUMNS: u32 = 5;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Raw configuration as written on disk
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    catalog: Option<PathBuf>,
    columns: Option<u32>,
    deny: Option<Vec<String>>,
}

/// Validated launcher configuration
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Catalog file path; `None` means use the platform default location
    pub catalog: Option<PathBuf>,

    /// Tiles per grid row
    pub columns: u32,

    /// Additional identifiers to exclude, on top of the built-in deny list
    pub deny: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            columns: DEFAULT_COLUMNS,
            deny: Vec::new(),
        }
    }
}

impl LauncherConfig {
    fn from_raw(raw: RawConfig) -> ConfigResult<Self> {
        let columns = raw.columns.unwrap_or(DEFAULT_COLUMNS);
        if columns == 0 {
            return Err(ConfigError::ValidationFailed(
                "columns must be at least 1".into(),
            ));
        }

        Ok(Self {
            catalog: raw.catalog,
            columns,
            deny: raw.deny.unwrap_or_default(),
        })
    }
}

/// Load and validate configuration from a TOML file.
///
/// A missing file is not an error; defaults are returned.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<LauncherConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(LauncherConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<LauncherConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    LauncherConfig::from_raw(raw)
}
