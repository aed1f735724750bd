//! Error types for persistence and configuration
//!
//! Graph mutations never fail with an error: guarded operations return `false`
//! or `None` and leave the graph untouched. Only the outer I/O surfaces below
//! produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for persistence operations
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Failures while reading or writing a persisted graph document
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid preset name '{0}'")]
    InvalidPresetName(String),

    #[error("No data directory available for presets")]
    NoDataDirectory,
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while loading the editor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
