//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, diagnostics and shell
//! completion.

pub mod app;
pub mod context;

// Re-export main types
pub use app::*;
pub use context::*;
