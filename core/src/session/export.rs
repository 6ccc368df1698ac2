//! Whole-session JSON export.
//!
//! A single document overwrite with no versioning or partial-write
//! protection; the export is a convenience artifact, not a recovery format.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::task::{Task, TaskStatus};

use super::log::ExecutionLog;

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub total_tasks: usize,
    pub successful_tasks: usize,
    pub failed_tasks: usize,
    pub total_retries: u32,
}

/// Complete session dump: summary, finished task details, execution log,
/// and the deliverables of every completed task.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub session_id: String,
    pub summary: SessionSummary,
    pub tasks: Vec<Task>,
    pub execution_log: ExecutionLog,
    pub final_deliverables: Vec<String>,
}

impl SessionExport {
    pub fn new(session_id: impl Into<String>, tasks: Vec<Task>, execution_log: ExecutionLog) -> Self {
        let successful_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let failed_tasks = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count();
        let total_retries = tasks.iter().map(|t| t.retry_count).sum();

        let final_deliverables = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .flat_map(|t| t.deliverables.iter().cloned())
            .collect();

        Self {
            session_id: session_id.into(),
            summary: SessionSummary {
                total_tasks: tasks.len(),
                successful_tasks,
                failed_tasks,
                total_retries,
            },
            tasks,
            execution_log,
            final_deliverables,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize session export")
    }

    /// Write the export, replacing any previous document at `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("failed to write session export to {:?}", path.as_ref()))
    }
}
