//! Test execution runner
//!
//! Sends every parameter of a test case to both services and diffs the replies.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diff;
use crate::http::{HistoryClient, HttpError};
use crate::models::{SubResult, TestCase, TestResult};
use crate::utils::Timer;

/// Runs test cases against the fullnode and ES services
pub struct TestRunner {
    fullnode: HistoryClient,
    es: HistoryClient,
    include_sources: bool,
}

impl TestRunner {
    /// Create a runner for the two base URLs
    pub fn new(
        fullnode_url: &str,
        es_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            fullnode: HistoryClient::new(fullnode_url, timeout)?,
            es: HistoryClient::new(es_url, timeout)?,
            include_sources: false,
        })
    }

    /// Create a runner from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, HttpError> {
        Self::new(&config.fullnode_api_url, &config.es_api_url, config.timeout())
    }

    /// Attach both raw bodies to failing sub-results
    pub fn with_include_sources(mut self, include_sources: bool) -> Self {
        self.include_sources = include_sources;
        self
    }

    /// Run every parameter of `test_case`
    ///
    /// The first request error aborts the whole test case.
    pub async fn run_test_case(&self, test_case: &TestCase) -> Result<TestResult, HttpError> {
        info!("Testing {}", test_case);
        let timer = Timer::start(format!("test case {}", test_case.edge));

        let mut results = Vec::with_capacity(test_case.params.len());

        for (index, params) in test_case.params.iter().enumerate() {
            let test_number = index + 1;
            let source1 = self
                .fullnode
                .perform_request(&test_case.method, &test_case.edge, params)
                .await?;
            let source2 = self
                .es
                .perform_request(&test_case.method, &test_case.edge, params)
                .await?;

            let result = match diff::diff(&source1, &source2) {
                None => SubResult::pass(test_number, params.clone()),
                Some(d) => {
                    debug!(
                        "{} #{}: {} differences",
                        test_case.edge,
                        test_number,
                        d.change_count()
                    );
                    let failed = SubResult::fail(test_number, params.clone(), d.to_value());
                    if self.include_sources {
                        failed.with_sources(source1, source2)
                    } else {
                        failed
                    }
                }
            };

            debug!("  {}", result);
            results.push(result);
        }

        let result = TestResult::new(test_case.edge.clone(), results);
        let elapsed_ms = timer.elapsed_ms();
        if result.is_all_passed() {
            info!("{} [{}ms]", result, elapsed_ms);
        } else {
            warn!("{} [{}ms]", result, elapsed_ms);
        }
        timer.stop();
        Ok(result)
    }
}
