// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeamError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    ConfigParse {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File walk error: {0}")]
    Walk(String),
}

impl SeamError {
    /// True for errors that must stop the run before analysis begins.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParse { .. } | Self::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SeamError>;

// Allow `?` on std::io::Error by converting to SeamError::Io with unknown path.
impl From<std::io::Error> for SeamError {
    fn from(source: std::io::Error) -> Self {
        SeamError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for SeamError {
    fn from(e: walkdir::Error) -> Self {
        SeamError::Walk(e.to_string())
    }
}
