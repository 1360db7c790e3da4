//! Error types for rmake

use std::io;
use thiserror::Error;

/// Result type alias for rmake operations
pub type Result<T> = std::result::Result<T, RmakeError>;

/// Main error type for rmake
#[derive(Error, Debug)]
pub enum RmakeError {
    /// Malformed makefile
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Dependency resolution errors
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML rendering errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to find makefile (searched: {0})")]
    NotFound(String),
}

/// Makefile syntax errors
///
/// Every variant carries the 0-based index of the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("blank lines are not allowed (line {line})")]
    BlankLine { line: usize },

    #[error("a task header must not start with a space or tab (line {line})")]
    IndentedHeader { line: usize },

    #[error("task '{name}' ends with ':' but declares no dependencies (line {line})")]
    ColonWithoutDependencies { line: usize, name: String },

    #[error("task '{name}' lists dependencies but is missing the ':' after its name (line {line})")]
    DependenciesWithoutColon { line: usize, name: String },

    #[error("task name is empty (line {line})")]
    EmptyTaskName { line: usize },

    #[error("task '{name}' is already declared on line {first_line} (line {line})")]
    DuplicateTask {
        line: usize,
        name: String,
        first_line: usize,
    },
}

impl FormatError {
    /// The 0-based line the error was detected on
    pub fn line(&self) -> usize {
        match self {
            FormatError::BlankLine { line }
            | FormatError::IndentedHeader { line }
            | FormatError::ColonWithoutDependencies { line, .. }
            | FormatError::DependenciesWithoutColon { line, .. }
            | FormatError::EmptyTaskName { line }
            | FormatError::DuplicateTask { line, .. } => *line,
        }
    }
}

/// Dependency resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("task '{0}' is not declared")]
    UnknownTask(String),

    #[error("task '{task}' depends on '{dependency}', which is not declared")]
    MissingDependency { task: String, dependency: String },

    #[error("circular dependency detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

impl ResolveError {
    /// Name of the undeclared task, for both unknown targets and dangling dependencies
    pub fn missing_task(&self) -> Option<&str> {
        match self {
            ResolveError::UnknownTask(name) => Some(name),
            ResolveError::MissingDependency { dependency, .. } => Some(dependency),
            ResolveError::Cycle { .. } => None,
        }
    }
}

/// Specialized result type for parsing operations
pub type FormatResult<T> = std::result::Result<T, FormatError>;

/// Specialized result type for resolution operations
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
