//! Editor configuration.

use crate::page::{DEFAULT_FRAME_BACKGROUND, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::snap::{ALIGNMENT_THRESHOLD, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of undo (and redo) snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for an editor instance. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub grid_size: f64,
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub snap_to_elements: bool,
    /// Maximum snapshots kept in each of the undo and redo stacks.
    pub history_limit: usize,
    pub alignment_threshold: f64,
    pub autosave_interval_secs: u64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub frame_background: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            show_grid: false,
            snap_to_grid: true,
            snap_to_elements: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            alignment_threshold: ALIGNMENT_THRESHOLD,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            frame_background: DEFAULT_FRAME_BACKGROUND.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }
}
