//! Whole-run orchestration
//!
//! Loads the configuration and test cases, runs every enabled test case and
//! writes the report. A failing test case is logged and left out of the
//! report; setup and report errors abort the run.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::config::{Config, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH};
use crate::executor::TestRunner;
use crate::models::TestCase;
use crate::results::{ReportWriter, RunSummary};
use crate::utils::Timer;

/// Inputs of one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub output_path: PathBuf,
    pub include_sources: bool,
    /// Overrides `timeout_secs` from the config file
    pub timeout_secs: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            include_sources: false,
            timeout_secs: None,
        }
    }
}

/// Drives a full parity run
pub struct Orchestrator {
    options: RunOptions,
}

impl Orchestrator {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Execute the run and return its summary
    pub async fn run(&self) -> Result<RunSummary> {
        let timer = Timer::start("parity run");

        let config = Config::load(&self.options.config_path)
            .context("Failed to load configuration")?
            .with_timeout_secs(self.options.timeout_secs);
        let test_cases = TestCase::load_all(&config.input_file)
            .context("Failed to load test cases")?;

        let report = ReportWriter::new(&self.options.output_path);
        report.remove_existing()?;

        info!(
            "Comparing {} against {} ({} test cases)",
            config.fullnode_api_url,
            config.es_api_url,
            test_cases.len()
        );

        let runner = TestRunner::from_config(&config)?
            .with_include_sources(self.options.include_sources);

        let mut summary = RunSummary::default();
        let mut results = Vec::new();

        for test_case in &test_cases {
            if !test_case.is_enabled() {
                debug!("Skipping disabled test case {}", test_case.edge);
                summary.record_skip();
                continue;
            }

            match runner.run_test_case(test_case).await {
                Ok(result) => {
                    summary.record(&result);
                    results.push(result);
                }
                Err(e) => {
                    let e = anyhow::Error::from(e);
                    error!("Test case {} failed with error: {:#}", test_case.edge, e);
                    summary.record_error(test_case.edge.clone());
                }
            }
        }

        report.write(&results)?;

        summary.duration_ms = timer.stop().as_millis() as u64;
        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            summary.duration_ms,
            summary.passed,
            summary.sub_tests(),
            summary.pass_rate()
        );

        Ok(summary)
    }
}
