//! history-parity - differential tests for two history API implementations
//!
//! Sends the same requests to a fullnode history API and to its ES-backed
//! reimplementation, diffs the JSON replies and writes a report.
//!
//! ## Usage
//!
//! ```bash
//! # Read ./config.json, write ./out.json
//! history-parity
//!
//! # Custom paths, keep raw bodies of failing sub-tests
//! history-parity --config ci/config.json --output ci/out.json --include-sources
//! ```
//!
//! `config.json`:
//!
//! ```json
//! {
//!     "fullnode_api_url": "http://127.0.0.1:8888",
//!     "es_api_url": "http://127.0.0.1:9999",
//!     "input_file": "tests.json"
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};

mod cli;
mod config;
mod diff;
mod executor;
mod http;
mod models;
mod results;
mod utils;

#[cfg(test)]
mod testing;

use cli::Args;
use config::EnvConfig;
use executor::Orchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    utils::init_logger(args.log_level(&env));

    if env.has_any() {
        debug!("Environment overrides: {:?}", env);
    }

    let options = args.run_options(&env);
    let summary = Orchestrator::new(options).run().await?;

    println!("{summary}");
    if !summary.is_clean() {
        warn!(
            "{} sub-tests diverged, {} test cases errored",
            summary.failed,
            summary.errored.len()
        );
    }

    Ok(())
}
