//! Result models written to the report
//!
//! One `TestResult` per completed test case, one `SubResult` per parameter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outcome of a single parameter variation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubResult {
    /// 1-based position of the parameter within its test case
    pub test_number: usize,
    pub params: Value,
    pub passed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<Value>,

    /// Raw fullnode body, only kept on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source1: Option<Value>,

    /// Raw ES body, only kept on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source2: Option<Value>,
}

impl SubResult {
    pub fn pass(test_number: usize, params: Value) -> Self {
        Self {
            test_number,
            params,
            passed: true,
            diff: None,
            source1: None,
            source2: None,
        }
    }

    pub fn fail(test_number: usize, params: Value, diff: Value) -> Self {
        Self {
            test_number,
            params,
            passed: false,
            diff: Some(diff),
            source1: None,
            source2: None,
        }
    }

    pub fn with_sources(mut self, source1: Value, source2: Value) -> Self {
        self.source1 = Some(source1);
        self.source2 = Some(source2);
        self
    }
}

impl fmt::Display for SubResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.passed { "✓" } else { "✗" };
        write!(f, "{symbol} #{} {}", self.test_number, self.params)
    }
}

/// Outcome of one test case
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub edge: String,
    pub results: Vec<SubResult>,
}

impl TestResult {
    pub fn new(edge: impl Into<String>, results: Vec<SubResult>) -> Self {
        Self {
            edge: edge.into(),
            results,
        }
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn is_all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} passed",
            self.edge,
            self.passed(),
            self.results.len()
        )
    }
}
