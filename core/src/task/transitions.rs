//! Status transition rules and validation.

use thiserror::Error;

use super::types::TaskStatus;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
    #[error("cannot transition from terminal status {status:?}")]
    FromTerminalStatus { status: TaskStatus },
}

/// Legality table for task status edges.
pub struct StatusTransition;

impl StatusTransition {
    /// Validate a status edge.
    ///
    /// Legal edges are exactly those the runner produces:
    /// pending -> in_progress, in_progress -> completed,
    /// in_progress -> pending (retry), in_progress -> failed.
    pub fn validate(from: TaskStatus, to: TaskStatus) -> Result<(), TransitionError> {
        if from.is_terminal() {
            return Err(TransitionError::FromTerminalStatus { status: from });
        }

        let is_valid = matches!(
            (from, to),
            (TaskStatus::Pending, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Completed)
                | (TaskStatus::InProgress, TaskStatus::Pending)
                | (TaskStatus::InProgress, TaskStatus::Failed)
        );

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }
}
