use thiserror::Error;

use crate::task::TransitionError;

/// Scheduler-specific errors for dependency graph admission and execution.
///
/// Graph problems (duplicates, dangling dependencies, cycles) are surfaced
/// before the run loop starts; a malformed task universe never enters
/// execution.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("dependency not found: task '{task_id}' depends on '{missing_dep}'")]
    DependencyNotFound {
        task_id: String,
        missing_dep: String,
    },

    #[error("circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("illegal status transition for task '{task_id}': {source}")]
    Transition {
        task_id: String,
        #[source]
        source: TransitionError,
    },

    #[error("scheduler invariant violated: {0}")]
    Internal(String),
}

impl SchedulerError {
    /// True for errors detectable before any task runs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTaskId(_)
                | Self::DependencyNotFound { .. }
                | Self::CircularDependency(_)
        )
    }
}
