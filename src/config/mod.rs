//! Configuration module
//!
//! Handles loading the run configuration and environment overrides.

mod env;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub use env::EnvConfig;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Default report file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "out.json";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Run configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the reference (fullnode) history API
    pub fullnode_api_url: String,

    /// Base URL of the ES-backed history API under test
    pub es_api_url: String,

    /// Path of the test-case file
    pub input_file: PathBuf,

    /// Request timeout in seconds, no timeout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_document(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("fullnode_api_url", &self.fullnode_api_url),
            ("es_api_url", &self.es_api_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} must not be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if self.input_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input_file must not be empty".into()));
        }

        Ok(())
    }

    /// Request timeout, `None` means wait indefinitely
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply an explicit timeout override
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}

/// Read a JSON (or YAML, by extension) document from disk
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = if is_yaml_file(path) {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
