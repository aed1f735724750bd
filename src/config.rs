//! Editor configuration
//!
//! Loaded from `<config dir>/waygraph/config.json` when the file exists. Every
//! field has a default, so partial files are accepted.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{interaction, persistence, sockets};
use crate::error::ConfigError;

/// User-tunable editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Overrides the directory that holds preset graphs
    pub data_dir: Option<PathBuf>,
    /// Preset selected when the editor starts
    pub active_preset: String,
    pub caret_blink_interval_ms: u64,
    pub double_click_threshold_ms: u64,
    pub socket_hit_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            active_preset: persistence::DEFAULT_PRESET.to_string(),
            caret_blink_interval_ms: interaction::CARET_BLINK_INTERVAL_MS,
            double_click_threshold_ms: interaction::DOUBLE_CLICK_THRESHOLD_MS,
            socket_hit_radius: sockets::SOCKET_HIT_RADIUS,
        }
    }
}

impl EditorConfig {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(persistence::APP_DIR_NAME)
                .join(persistence::CONFIG_FILE_NAME)
        })
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Directory holding preset documents
    pub fn preset_dir(&self) -> Option<PathBuf> {
        match &self.data_dir {
            Some(dir) => Some(dir.join(persistence::PRESET_DIR_NAME)),
            None => dirs::data_dir().map(|dir| {
                dir.join(persistence::APP_DIR_NAME)
                    .join(persistence::PRESET_DIR_NAME)
            }),
        }
    }
}
