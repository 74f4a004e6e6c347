//! Settings loaded from `config.json` in the user's config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Preset class names offered by the label selector.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_labels() -> Vec<String> {
    ["person", "bicycle", "car", "dog", "cat"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_window_size() -> [f32; 2] {
    [1200.0, 800.0]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            labels: default_labels(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            window_size: default_window_size(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("detect-annotate").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from an explicit path, failing loudly, or from the default
    /// location, falling back to defaults if it is absent or unreadable.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            log::info!("no config file found, using defaults");
            return Ok(Self::default());
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Ok(Self::default())
            }
        }
    }
}
