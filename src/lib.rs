//! rmake - a minimal build dependency resolver
//!
//! rmake reads a makefile-style task list, works out the order in which the
//! prerequisites of a task have to run, and prints every task in that order
//! together with its action lines. Nothing is executed.

// Public modules
pub mod cli;
pub mod error;
pub mod graph;
pub mod resolver;

// Re-export commonly used types
pub use error::{FormatError, ResolveError, Result, RmakeError};
pub use graph::{parse_lines, parse_str, TaskGraph, TaskName, TaskRecord};
pub use resolver::{resolve, ExecutionPath, ExecutionPlan};

/// Current version of rmake
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
