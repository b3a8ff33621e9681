//! Test-case definitions
//!
//! A test case names one endpoint ("edge") and the request bodies to send to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::config::{load_document, ConfigError};

/// One endpoint under test with its parameter variations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// HTTP method, e.g. GET or POST
    pub method: String,

    /// Path relative to the service base URL
    pub edge: String,

    /// Request bodies, one per sub-test
    pub params: Vec<Value>,

    /// Disabled test cases are skipped; absent means enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl TestCase {
    #[cfg(test)]
    pub fn new(method: impl Into<String>, edge: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            edge: edge.into(),
            params,
            enabled: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Load the ordered test-case list from a JSON array file
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<TestCase>, ConfigError> {
        load_document(path.as_ref())
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} params)",
            self.method.to_uppercase(),
            self.edge,
            self.params.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enabled_defaults_to_true() {
        let case: TestCase = serde_json::from_value(json!({
            "method": "POST",
            "edge": "/v1/history/get_actions",
            "params": [{"account_name": "eosio"}]
        }))
        .unwrap();

        assert!(case.is_enabled());
        assert_eq!(case.params.len(), 1);
    }

    #[test]
    fn test_disabled_case() {
        let case: TestCase = serde_json::from_value(json!({
            "method": "GET",
            "edge": "items",
            "params": [],
            "enabled": false
        }))
        .unwrap();
        assert!(!case.is_enabled());

        let explicit: TestCase = serde_json::from_value(json!({
            "method": "GET",
            "edge": "items",
            "params": [],
            "enabled": true
        }))
        .unwrap();
        assert!(explicit.is_enabled());
    }

    #[test]
    fn test_load_all_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.json");
        std::fs::write(
            &path,
            r#"[
                {"method": "POST", "edge": "/a", "params": [1]},
                {"method": "POST", "edge": "/b", "params": [2, 3], "enabled": false},
                {"method": "GET", "edge": "/c", "params": []}
            ]"#,
        )
        .unwrap();

        let cases = TestCase::load_all(&path).unwrap();
        let edges: Vec<_> = cases.iter().map(|c| c.edge.as_str()).collect();
        assert_eq!(edges, ["/a", "/b", "/c"]);
        assert!(!cases[1].is_enabled());
    }

    #[test]
    fn test_load_all_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.json");
        std::fs::write(&path, r#"{"method": "GET"}"#).unwrap();

        assert!(matches!(
            TestCase::load_all(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_display() {
        let case = TestCase::new("post", "/items", vec![json!(1), json!(2)]);
        assert_eq!(case.to_string(), "POST /items (2 params)");
    }
}
