//! CLI argument parsing
//!
//! Every flag is optional; with no arguments the run reads `config.json`
//! and writes `out.json` in the working directory.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{EnvConfig, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH};
use crate::executor::RunOptions;
use crate::utils::LogLevel;

/// Differential test runner for the fullnode and ES history APIs
#[derive(Parser, Debug, Default)]
#[command(name = "history-parity")]
#[command(version)]
#[command(about = "Compare JSON responses of two history API implementations")]
#[command(long_about = None)]
pub struct Args {
    /// Configuration file [env: HISTORY_PARITY_CONFIG] [default: config.json]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file [env: HISTORY_PARITY_OUTPUT] [default: out.json]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Attach both raw responses to failing sub-tests
    #[arg(long)]
    pub include_sources: bool,

    /// Request timeout in seconds, overrides the config file
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Merge flags with environment overrides; flags win
    pub fn run_options(&self, env: &EnvConfig) -> RunOptions {
        RunOptions {
            config_path: self
                .config
                .clone()
                .or_else(|| env.config_file.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            output_path: self
                .output
                .clone()
                .or_else(|| env.output_file.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            include_sources: self.include_sources || env.include_sources.unwrap_or(false),
            timeout_secs: self.timeout.or(env.timeout),
        }
    }

    /// Resolve the log level, unknown names fall back to info
    pub fn log_level(&self, env: &EnvConfig) -> LogLevel {
        self.log_level
            .as_deref()
            .or(env.log_level.as_deref())
            .and_then(|name| name.parse().ok())
            .unwrap_or_default()
    }
}
