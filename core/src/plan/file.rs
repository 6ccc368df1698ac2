//! TOML plan files: explicit `[[tasks]]` entries, `[[phases]]` blocks, or
//! a mix of both (explicit tasks first, then the expanded phases).

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::classify::RuleTable;
use crate::task::{Task, TaskPriority};

use super::builder::{build_plan, PhaseSpec};

/// Explicitly declared task entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    pub id: String,
    pub description: String,
    /// Defaults to the rule-table classification of the description.
    #[serde(default)]
    pub worker_kind: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub max_retry_attempts: Option<u32>,
    #[serde(default)]
    pub timeout_minutes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
}

impl PlanDocument {
    pub fn parse(input: &str) -> Result<Self> {
        let doc: Self = toml::from_str(input).context("failed to parse plan document")?;
        if doc.tasks.is_empty() && doc.phases.is_empty() {
            bail!("plan declares neither tasks nor phases");
        }
        Ok(doc)
    }

    /// Materialize the declared work as runnable tasks.
    pub fn into_tasks(self, session_id: &str, rules: &RuleTable) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .into_iter()
            .map(|spec| {
                let worker_kind = spec
                    .worker_kind
                    .unwrap_or_else(|| rules.label_for(&spec.description).to_string());
                let mut task = Task::new(spec.id, spec.description, worker_kind)
                    .with_dependencies(spec.dependencies);
                if let Some(priority) = spec.priority {
                    task.priority = priority;
                }
                if let Some(max) = spec.max_retry_attempts {
                    task.max_retry_attempts = max;
                }
                if let Some(timeout) = spec.timeout_minutes {
                    task.timeout_minutes = timeout;
                }
                task.deliverables = spec.deliverables;
                task
            })
            .collect();

        tasks.extend(build_plan(session_id, &self.phases, rules));
        tasks
    }
}

/// Read and materialize a plan file.
pub fn load_plan(path: &Path, session_id: &str, rules: &RuleTable) -> Result<Vec<Task>> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file {path:?}"))?;
    let doc = PlanDocument::parse(&input)?;
    Ok(doc.into_tasks(session_id, rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use pretty_assertions::assert_eq;

    const PLAN: &str = r#"
session_id = "demo"

[[tasks]]
id = "setup"
description = "prepare workspace"
worker_kind = "orchestrator"

[[tasks]]
id = "impl"
description = "implement the feature"
dependencies = ["setup"]
max_retry_attempts = 1
priority = "critical"
"#;

    #[test]
    fn explicit_tasks_round_trip() {
        let doc = PlanDocument::parse(PLAN).unwrap();
        assert_eq!(doc.session_id.as_deref(), Some("demo"));

        let tasks = doc.into_tasks("demo", &RuleTable::default());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].worker_kind, "orchestrator");
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[1].dependencies, vec!["setup"]);
        assert_eq!(tasks[1].max_retry_attempts, 1);
        assert_eq!(tasks[1].priority, TaskPriority::Critical);
        // worker_kind omitted -> classified from the description
        assert_eq!(tasks[1].worker_kind, "developer");
    }

    #[test]
    fn empty_plan_is_rejected() {
        assert!(PlanDocument::parse("session_id = \"x\"").is_err());
    }

    #[test]
    fn phases_expand_after_explicit_tasks() {
        let input = r#"
[[tasks]]
id = "seed"
description = "prepare"

[[phases]]
name = "build"
tasks = ["implement the core"]
deliverables = ["core.rs"]
"#;
        let tasks = PlanDocument::parse(input)
            .unwrap()
            .into_tasks("s", &RuleTable::default());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, "s_task_001");
        assert_eq!(tasks[1].deliverables, vec!["core.rs"]);
    }
}
