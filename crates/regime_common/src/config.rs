//! Configuration for regime.
//!
//! Loaded from `$REGIME_CONFIG` when set, otherwise from
//! `<config dir>/regime/config.toml`. Every field has a default, so a missing
//! file or a partial file is fine. A file that exists but does not parse is
//! an error.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment override for the config file path
pub const CONFIG_ENV: &str = "REGIME_CONFIG";

const CONFIG_DIR: &str = "regime";
const CONFIG_FILE: &str = "config.toml";

/// Feature table location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_features_path")]
    pub features_path: PathBuf,
}

fn default_features_path() -> PathBuf {
    PathBuf::from("data/features/macro_features_with_regime.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            features_path: default_features_path(),
        }
    }
}

/// Completion executable and fixed decoding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// llama.cpp style completion binary
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Model weights passed with `-m`
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Sampling temperature (kept low for factual output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum generated tokens
    #[serde(default = "default_n_predict")]
    pub n_predict: u32,

    /// Layers offloaded to the GPU
    #[serde(default = "default_gpu_layers")]
    pub gpu_layers: u32,

    /// Kill the executable after this many seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_binary() -> PathBuf {
    PathBuf::from("external/llama.cpp/build/bin/llama-cli")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("external/llama.cpp/models/mistral-7b-instruct-v0.2.Q5_K_M.gguf")
}

fn default_temperature() -> f32 {
    0.2
}

fn default_n_predict() -> u32 {
    300
}

fn default_gpu_layers() -> u32 {
    40
}

impl LlmConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            model_path: default_model_path(),
            temperature: default_temperature(),
            n_predict: default_n_predict(),
            gpu_layers: default_gpu_layers(),
            timeout_secs: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load from the resolved config path, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Config file location: `$REGIME_CONFIG`, then the platform config dir
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}
