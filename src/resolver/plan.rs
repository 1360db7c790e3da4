//! Execution plans
//!
//! An [`ExecutionPlan`] joins a resolved [`ExecutionPath`] with the action
//! lines of every task so it can be printed or serialized.

use crate::error::{ResolveError, ResolveResult};
use crate::graph::{TaskGraph, TaskName};
use crate::resolver::{resolve, ExecutionPath};
use serde::Serialize;
use std::io::{self, Write};

/// A resolved target with the actions of every task, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    /// The requested task
    pub target: TaskName,

    /// One step per task, prerequisites first
    pub steps: Vec<PlanStep>,
}

/// A single task in an execution plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    pub task: TaskName,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskName>,

    pub actions: Vec<String>,
}

impl ExecutionPlan {
    /// Resolve `target` and collect the actions along the way
    pub fn build(graph: &TaskGraph, target: &str) -> ResolveResult<Self> {
        let path = resolve(graph, target)?;
        Self::from_path(graph, &path)
    }

    /// Join an already resolved path with the records of `graph`
    ///
    /// Fails if the path names a task `graph` does not declare.
    pub fn from_path(graph: &TaskGraph, path: &ExecutionPath) -> ResolveResult<Self> {
        let steps = path
            .iter()
            .map(|name| {
                let record = graph
                    .get(name)
                    .ok_or_else(|| ResolveError::UnknownTask(name.to_string()))?;
                Ok(PlanStep {
                    task: record.name.clone(),
                    dependencies: record.dependencies().to_vec(),
                    actions: record.actions.clone(),
                })
            })
            .collect::<ResolveResult<Vec<_>>>()?;

        Ok(ExecutionPlan {
            target: path.target().to_string(),
            steps,
        })
    }

    /// Task names in execution order
    pub fn task_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.task.as_str()).collect()
    }

    /// Write each task name followed by its action lines, one per line
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for step in &self.steps {
            writeln!(out, "{}", step.task)?;
            for action in &step.actions {
                writeln!(out, "{}", action)?;
            }
        }
        Ok(())
    }

    /// Render the plan as plain text
    pub fn to_text(&self) -> String {
        let mut buffer = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_text(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Render the plan as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
