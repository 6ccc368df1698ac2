use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transitions::{StatusTransition, TransitionError};

/// Lifecycle status of a task.
///
/// `Blocked` and `Cancelled` are declared states that callers may observe or
/// set externally; the runner itself never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Blocked,
    Cancelled,
}

impl TaskStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Advisory priority level.
///
/// Carried, serialized, and surfaced in reports, but never consulted for
/// execution order: ready tasks run in declaration order (FIFO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// One declared unit of work with dependencies, retry budget, and status.
///
/// Identity (`id`) is fixed at construction; every other field is mutated
/// only by the owning runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,

    /// Label naming which external worker kind should handle this task.
    pub worker_kind: String,

    #[serde(default)]
    pub priority: TaskPriority,

    pub status: TaskStatus,

    /// Ids of tasks that must be completed before this one becomes ready.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Advisory resource hints, not enforced.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,

    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Advisory wall-clock hint in minutes. No cutoff is enforced.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    #[serde(default)]
    pub retry_count: u32,

    /// One timestamped entry per failed attempt.
    #[serde(default)]
    pub error_log: Vec<String>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Payload returned by the work callback on success.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

fn default_max_retry_attempts() -> u32 {
    3
}

fn default_timeout_minutes() -> u64 {
    30
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        worker_kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            worker_kind: worker_kind.into(),
            priority: TaskPriority::default(),
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            skills: Vec::new(),
            commands: Vec::new(),
            deliverables: Vec::new(),
            max_retry_attempts: default_max_retry_attempts(),
            timeout_minutes: default_timeout_minutes(),
            retry_count: 0,
            error_log: Vec::new(),
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            result: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_retry_attempts(mut self, max_retry_attempts: u32) -> Self {
        self.max_retry_attempts = max_retry_attempts;
        self
    }

    /// Move this task to `to`, validating the edge first.
    pub fn transition(&mut self, to: TaskStatus) -> Result<(), TransitionError> {
        StatusTransition::validate(self.status, to)?;
        self.status = to;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// Common task interface for dependency graph handling.
pub trait TaskLike {
    fn id(&self) -> &str;
    fn dependencies(&self) -> &[String];
}

impl TaskLike for Task {
    fn id(&self) -> &str {
        &self.id
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

impl<T: TaskLike> TaskLike for &T {
    fn id(&self) -> &str {
        (*self).id()
    }

    fn dependencies(&self) -> &[String] {
        (*self).dependencies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let task = Task::new("t1", "do something", "worker");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.max_retry_attempts, 3);
        assert_eq!(task.timeout_minutes, 30);
        assert_eq!(task.retry_count, 0);
        assert!(task.error_log.is_empty());
        assert!(task.started_at.is_none());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn transition_mutates_status_on_legal_edge() {
        let mut task = Task::new("t1", "d", "w");
        task.transition(TaskStatus::InProgress).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        task.transition(TaskStatus::Completed).unwrap();
        assert!(task.is_finished());
    }

    #[test]
    fn transition_rejects_illegal_edge() {
        let mut task = Task::new("t1", "d", "w");
        assert!(task.transition(TaskStatus::Completed).is_err());
        assert_eq!(task.status, TaskStatus::Pending);
    }
}
