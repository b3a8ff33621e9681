//! HTTP client module
//!
//! Provides the JSON request wrapper used against both history services.

mod client;

pub use client::{HistoryClient, HttpError};
