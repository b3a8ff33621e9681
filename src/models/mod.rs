//! Data models for differential testing
//!
//! Test-case definitions read from disk and the results written to the report.

mod test_case;
mod test_result;

pub use test_case::TestCase;
pub use test_result::{SubResult, TestResult};
