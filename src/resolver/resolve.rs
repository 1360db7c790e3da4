//! Dependency resolution
//!
//! Iterative depth-first search over a [`TaskGraph`]. Two stacks drive the
//! walk: `path` holds every task scheduled so far and `frontier` holds the
//! chain of ancestors still being expanded. No recursion is used, so
//! dependency chains of any depth resolve without growing the call stack.

use crate::error::{ResolveError, ResolveResult};
use crate::graph::{TaskGraph, TaskName, TaskRecord};
use std::collections::HashSet;

/// Tasks in prerequisite-execution order
///
/// Every dependency of a task appears before it and the requested target is
/// always last. Read front to back to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPath {
    tasks: Vec<TaskName>,
}

impl ExecutionPath {
    /// The task the path was resolved for
    pub fn target(&self) -> &str {
        self.tasks.last().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(String::as_str)
    }

    /// Position of a task in execution order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn as_slice(&self) -> &[TaskName] {
        &self.tasks
    }

    pub fn into_vec(self) -> Vec<TaskName> {
        self.tasks
    }
}

impl<'a> IntoIterator for &'a ExecutionPath {
    type Item = &'a TaskName;
    type IntoIter = std::slice::Iter<'a, TaskName>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Ordered stack with a hash index for constant-time membership checks
#[derive(Default)]
struct TaskStack<'g> {
    items: Vec<&'g str>,
    index: HashSet<&'g str>,
}

impl<'g> TaskStack<'g> {
    fn push(&mut self, name: &'g str) {
        self.items.push(name);
        self.index.insert(name);
    }

    fn peek(&self) -> Option<&'g str> {
        self.items.last().copied()
    }

    fn pop(&mut self) -> Option<&'g str> {
        let name = self.items.pop()?;
        self.index.remove(name);
        Some(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Items from `name` up to the top of the stack
    fn chain_from(&self, name: &str) -> Vec<TaskName> {
        let start = self
            .items
            .iter()
            .position(|item| *item == name)
            .unwrap_or(0);
        self.items[start..].iter().map(|s| s.to_string()).collect()
    }
}

/// Compute the execution order for `target`
///
/// Dependencies are expanded leftmost first in declared order. Fails when the
/// target or any dependency reachable from it is undeclared, or when a cycle
/// is reachable from the target. Nothing is returned on failure.
pub fn resolve(graph: &TaskGraph, target: &str) -> ResolveResult<ExecutionPath> {
    let root = graph
        .get(target)
        .ok_or_else(|| ResolveError::UnknownTask(target.to_string()))?;

    let mut path = TaskStack::default();
    let mut frontier = TaskStack::default();
    let mut completed: Vec<TaskName> = Vec::new();

    path.push(&root.name);
    frontier.push(&root.name);

    while let Some(current) = frontier.peek() {
        let record = graph
            .get(current)
            .ok_or_else(|| ResolveError::UnknownTask(current.to_string()))?;

        match next_unscheduled(record, &path, &frontier)? {
            Some(dependency) => {
                let next = graph.get(dependency).ok_or_else(|| {
                    ResolveError::MissingDependency {
                        task: current.to_string(),
                        dependency: dependency.to_string(),
                    }
                })?;
                path.push(&next.name);
                frontier.push(&next.name);
            }
            None => {
                frontier.pop();
                completed.push(current.to_string());
                if current == target {
                    break;
                }
            }
        }
    }

    Ok(ExecutionPath { tasks: completed })
}

/// Find the first dependency of `record` that is not scheduled yet
///
/// A dependency that is both scheduled and still on the frontier is an
/// ancestor of `record`, which closes a cycle.
fn next_unscheduled<'g>(
    record: &'g TaskRecord,
    path: &TaskStack<'g>,
    frontier: &TaskStack<'g>,
) -> ResolveResult<Option<&'g str>> {
    for dependency in record.dependencies() {
        if !path.contains(dependency) {
            return Ok(Some(dependency.as_str()));
        }

        if frontier.contains(dependency) {
            let mut cycle = frontier.chain_from(dependency);
            cycle.push(dependency.clone());
            return Err(ResolveError::Cycle { cycle });
        }
    }

    Ok(None)
}
