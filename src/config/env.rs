//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "HISTORY_PARITY";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Config file from HISTORY_PARITY_CONFIG
    pub config_file: Option<String>,
    /// Report file from HISTORY_PARITY_OUTPUT
    pub output_file: Option<String>,
    /// Timeout from HISTORY_PARITY_TIMEOUT
    pub timeout: Option<u64>,
    /// Include sources from HISTORY_PARITY_INCLUDE_SOURCES
    pub include_sources: Option<bool>,
    /// Log level from HISTORY_PARITY_LOG
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            config_file: get("CONFIG"),
            output_file: get("OUTPUT"),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            include_sources: get("INCLUDE_SOURCES").map(|v| parse_bool(&v)),
            log_level: get("LOG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.config_file.is_some()
            || self.output_file.is_some()
            || self.timeout.is_some()
            || self.include_sources.is_some()
            || self.log_level.is_some()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}
