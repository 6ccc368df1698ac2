use serde::Deserialize;

use crate::classify::{estimate_timeout_minutes, RuleTable};
use crate::task::{Task, TaskPriority};

/// One phase of declared work: task descriptions plus the deliverables the
/// phase is expected to produce.
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

/// Expand phases into a runnable task list.
///
/// Ids follow `{session_id}_task_{n:03}`. Each task depends on the previous
/// one across the whole plan, so phases run strictly in declaration order.
/// Worker kind, skills, and commands come from the rule table; the timeout
/// hint from the complexity heuristic.
pub fn build_plan(session_id: &str, phases: &[PhaseSpec], rules: &RuleTable) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut counter: usize = 1;

    for phase in phases {
        for description in &phase.tasks {
            let id = format!("{session_id}_task_{counter:03}");
            let rule = rules.classify(description);

            let mut task = Task::new(
                id,
                description.clone(),
                rule.map(|r| r.label.as_str()).unwrap_or(rules.default_label()),
            )
            .with_priority(TaskPriority::High);

            if counter > 1 {
                task.dependencies = vec![format!("{session_id}_task_{:03}", counter - 1)];
            }
            if let Some(rule) = rule {
                task.skills = rule.skills.clone();
                task.commands = rule.commands.clone();
            }
            task.deliverables = phase.deliverables.clone();
            task.timeout_minutes = estimate_timeout_minutes(description);

            tasks.push(task);
            counter += 1;
        }
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn phases() -> Vec<PhaseSpec> {
        vec![
            PhaseSpec {
                name: "discovery".to_string(),
                tasks: vec!["locate the config loader".to_string()],
                deliverables: vec!["inventory.md".to_string()],
            },
            PhaseSpec {
                name: "implementation".to_string(),
                tasks: vec![
                    "implement the parser".to_string(),
                    "validate the parser".to_string(),
                ],
                deliverables: vec!["parser.rs".to_string()],
            },
        ]
    }

    #[test]
    fn ids_and_chain_dependencies() {
        let tasks = build_plan("s1", &phases(), &RuleTable::default());
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "s1_task_001");
        assert!(tasks[0].dependencies.is_empty());
        assert_eq!(tasks[1].dependencies, vec!["s1_task_001"]);
        assert_eq!(tasks[2].dependencies, vec!["s1_task_002"]);
    }

    #[test]
    fn worker_kind_and_hints_come_from_rules() {
        let tasks = build_plan("s1", &phases(), &RuleTable::default());
        assert_eq!(tasks[0].worker_kind, "codebase-locator");
        assert_eq!(tasks[1].worker_kind, "developer");
        assert!(!tasks[1].skills.is_empty());
        assert_eq!(tasks[1].timeout_minutes, 45);
        assert_eq!(tasks[2].timeout_minutes, 30);
        assert_eq!(tasks[1].deliverables, vec!["parser.rs"]);
    }
}
