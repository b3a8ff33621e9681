//! Test execution engine
//!
//! Runs test cases against both services and drives a whole run.

mod orchestrator;
mod runner;

pub use orchestrator::{Orchestrator, RunOptions};
pub use runner::TestRunner;
