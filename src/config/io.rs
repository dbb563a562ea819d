// src/config/io.rs
use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{Config, SeamToml};
use crate::error::{Result, SeamError};

pub const CONFIG_FILE: &str = "seamcheck.toml";

/// Reads and parses a configuration file.
///
/// # Errors
/// Returns `ConfigNotFound` if the file is missing, `Io` if it cannot be read
/// and `ConfigParse` if it is not valid TOML for the expected shape.
pub fn load_file(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(SeamError::ConfigNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| SeamError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let config = parse_toml(&content, path)?;
    debug!(
        path = %path.display(),
        components = config.components.len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Parses configuration text. `origin` is only used in error messages.
///
/// # Errors
/// Returns `ConfigParse` on malformed TOML.
pub fn parse_toml(content: &str, origin: &Path) -> Result<Config> {
    let parsed: SeamToml = toml::from_str(content).map_err(|source| SeamError::ConfigParse {
        source,
        path: origin.to_path_buf(),
    })?;
    Ok(Config::from(parsed))
}
