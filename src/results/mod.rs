//! Results reporting module
//!
//! Writes the parity report file and summarizes a run.

mod report;
mod summary;

pub use report::ReportWriter;
pub use summary::RunSummary;
