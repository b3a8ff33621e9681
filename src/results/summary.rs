//! Run summary
//!
//! Counts gathered while the orchestrator walks the test cases.

use serde::Serialize;
use std::fmt;

use crate::models::TestResult;

/// Totals for one run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Test cases that ran to completion
    pub executed: usize,

    /// Test cases skipped because they are disabled
    pub skipped: usize,

    /// Edges of test cases aborted by an error
    pub errored: Vec<String>,

    /// Sub-tests with identical responses
    pub passed: usize,

    /// Sub-tests with diverging responses
    pub failed: usize,

    pub duration_ms: u64,
}

impl RunSummary {
    pub fn record(&mut self, result: &TestResult) {
        self.executed += 1;
        self.passed += result.passed();
        self.failed += result.failed();
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn record_error(&mut self, edge: impl Into<String>) {
        self.errored.push(edge.into());
    }

    pub fn sub_tests(&self) -> usize {
        self.passed + self.failed
    }

    pub fn pass_rate(&self) -> f64 {
        if self.sub_tests() == 0 {
            0.0
        } else {
            (self.passed as f64 / self.sub_tests() as f64) * 100.0
        }
    }

    /// True when every executed sub-test matched and no test case errored
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errored.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Test cases: {} run | {} skipped | {} errored",
            self.executed,
            self.skipped,
            self.errored.len()
        )?;
        write!(
            f,
            "Sub-tests: {} | Pass: {} | Fail: {} | Pass Rate: {:.1}% | Duration: {}ms",
            self.sub_tests(),
            self.passed,
            self.failed,
            self.pass_rate(),
            self.duration_ms
        )?;
        for edge in &self.errored {
            write!(f, "\n  ! {edge}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubResult;
    use serde_json::json;

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(&TestResult::new(
            "/a",
            vec![
                SubResult::pass(1, json!(1)),
                SubResult::fail(2, json!(2), json!({"$delete": 1})),
            ],
        ));
        summary.record(&TestResult::new("/b", vec![SubResult::pass(1, json!(1))]));
        summary.record_skip();
        summary.record_error("/c");

        assert_eq!(summary.executed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errored, vec!["/c".to_string()]);
        assert_eq!(summary.sub_tests(), 3);
        assert_eq!(summary.passed, 2);
        assert!(!summary.is_clean());
        assert!(summary.to_string().contains("! /c"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert_eq!(summary.pass_rate(), 0.0);
        assert!(summary.is_clean());
    }
}
