//! Dependency resolution
//!
//! This module computes execution orders over a task graph and turns them
//! into printable plans.

pub mod plan;
pub mod resolve;

// Re-export main types
pub use plan::*;
pub use resolve::*;
