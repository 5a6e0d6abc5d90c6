//! Foundational data structures, error types, and diagnostics.

pub mod diagnostics;
pub mod error;
pub mod models;
