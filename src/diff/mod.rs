//! Structural JSON comparison
//!
//! Produces a JSON-serializable description of where two responses diverge.

mod json;

pub use json::diff;
