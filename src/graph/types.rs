//! Task graph data types

use crate::error::{FormatError, FormatResult, ResolveResult};
use crate::resolver::{resolve, ExecutionPath};
use std::collections::HashMap;

/// Task identifier (case-sensitive, never empty, never contains whitespace)
pub type TaskName = String;

/// A single declared task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Task name
    pub name: TaskName,

    /// Declared dependencies, `None` when the header has no dependency list
    pub dependency_list: Option<Vec<TaskName>>,

    /// Action lines, verbatim including their indentation
    pub actions: Vec<String>,

    /// 0-based line of the task header
    pub line: usize,
}

impl TaskRecord {
    pub fn new(name: impl Into<TaskName>, line: usize) -> Self {
        TaskRecord {
            name: name.into(),
            dependency_list: None,
            actions: Vec::new(),
            line,
        }
    }

    /// Declared dependencies in source order (empty when there is no list)
    pub fn dependencies(&self) -> &[TaskName] {
        self.dependency_list.as_deref().unwrap_or(&[])
    }

    /// Whether the header carried a dependency list at all
    pub fn has_dependency_list(&self) -> bool {
        self.dependency_list.is_some()
    }
}

/// Immutable mapping from task name to its record
///
/// Built once by the parser; records are only handed out by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGraph {
    tasks: HashMap<TaskName, TaskRecord>,
    order: Vec<TaskName>,
}

impl TaskGraph {
    /// Fail if a task with the same name is already declared
    pub(crate) fn ensure_undeclared(&self, record: &TaskRecord) -> FormatResult<()> {
        match self.tasks.get(&record.name) {
            Some(existing) => Err(FormatError::DuplicateTask {
                line: record.line,
                name: record.name.clone(),
                first_line: existing.line,
            }),
            None => Ok(()),
        }
    }

    /// Add a record, rejecting a second declaration of the same name
    pub(crate) fn insert(&mut self, record: TaskRecord) -> FormatResult<()> {
        self.ensure_undeclared(&record)?;

        self.order.push(record.name.clone());
        self.tasks.insert(record.name.clone(), record);
        Ok(())
    }

    /// Look up a task by name
    pub fn get(&self, name: &str) -> Option<&TaskRecord> {
        self.tasks.get(name)
    }

    /// Check whether a task is declared
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Number of declared tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Task records in declaration order
    pub fn records(&self) -> impl Iterator<Item = &TaskRecord> {
        self.order.iter().filter_map(|name| self.tasks.get(name))
    }

    /// Compute the execution order for `target`
    pub fn resolve(&self, target: &str) -> ResolveResult<ExecutionPath> {
        resolve(self, target)
    }
}
