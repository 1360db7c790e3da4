//! Diagnostic output for a single run
//!
//! Messages go to stderr so that stdout only ever carries the plan.

use crate::graph::MAKEFILE_NAME;
use colored::Colorize;
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Run context that tracks the makefile in use and how chatty to be
pub struct Context {
    /// Makefile path, once located
    pub makefile_path: Option<PathBuf>,

    /// Verbosity level
    pub verbosity: Verbosity,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            makefile_path: None,
            verbosity: Verbosity::Normal,
        }
    }

    /// Set the makefile path
    pub fn with_makefile_path(mut self, path: PathBuf) -> Self {
        self.makefile_path = Some(path);
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Name of the makefile in use, for messages
    pub fn makefile_name(&self) -> String {
        self.makefile_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| MAKEFILE_NAME.to_string())
    }

    /// Print warning message
    pub fn print_warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{} {}", "[WARN]".yellow(), message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", "[ERROR]".red().bold(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{} {}", "[DEBUG]".dimmed(), message);
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
