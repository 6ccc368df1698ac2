use std::collections::HashSet;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::report::{self, ExecutionReport, ProgressObserver};
use crate::session::{ExecutionLog, SessionExport};
use crate::task::{Task, TaskStatus, TransitionError};

use super::graph::DependencyGraph;
use super::ready::ReadyQueue;
use super::worker::{TaskWorker, WorkError};

/// Single-threaded task runner.
///
/// Owns the full task universe for its lifetime and is its only mutator:
/// pending queue, active set, and finished history. Tasks advance
/// `pending -> in_progress -> completed | pending (retry) | failed`, ready
/// tasks run strictly in declaration order, and a progress report goes out
/// to registered observers after every tick that executed something.
pub struct SequentialRunner {
    session_id: String,
    queue: ReadyQueue,
    active: Vec<Task>,
    finished: Vec<Task>,
    completed_ids: HashSet<String>,
    observers: Vec<(String, Box<dyn ProgressObserver>)>,
    log: ExecutionLog,
}

impl SequentialRunner {
    pub fn new() -> Self {
        Self::with_session_id(format!("session_{}", Uuid::new_v4()))
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            queue: ReadyQueue::new(),
            active: Vec::new(),
            finished: Vec::new(),
            completed_ids: HashSet::new(),
            observers: Vec::new(),
            log: ExecutionLog::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn add_task(&mut self, task: Task) {
        self.log.record(
            "task_added",
            Some(&task.id),
            json!({
                "description": task.description,
                "worker_kind": task.worker_kind,
                "dependencies": task.dependencies,
            }),
        );
        self.queue.push_back(task);
    }

    pub fn add_tasks(&mut self, tasks: Vec<Task>) {
        for task in tasks {
            self.add_task(task);
        }
    }

    /// Register an observer under a caller-chosen name.
    pub fn register_observer(&mut self, name: impl Into<String>, observer: Box<dyn ProgressObserver>) {
        self.observers.push((name.into(), observer));
    }

    /// Remove a previously registered observer. Returns false if unknown.
    pub fn unregister_observer(&mut self, name: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(n, _)| n != name);
        self.observers.len() != before
    }

    pub fn execution_log(&self) -> &ExecutionLog {
        &self.log
    }

    /// Snapshot the whole session for export. Includes finished tasks plus
    /// anything still queued (non-empty only if a run aborted).
    pub fn export(&self) -> SessionExport {
        let mut tasks = self.finished.clone();
        tasks.extend(self.queue.iter().cloned());
        SessionExport::new(self.session_id.clone(), tasks, self.log.clone())
    }

    /// Run every declared task to a terminal status and return the final
    /// report.
    ///
    /// The declared universe is validated first: duplicate ids, dependencies
    /// on unknown tasks, and dependency cycles are rejected here, before any
    /// work callback fires. Execution then proceeds tick by tick: drain the
    /// ready set, attempt each ready task in order, fold finished tasks into
    /// history, and notify observers. Because attempts resolve synchronously
    /// there is nothing to poll for between ticks; readiness is recomputed
    /// immediately after each batch.
    pub async fn run(&mut self, worker: &dyn TaskWorker) -> Result<ExecutionReport, SchedulerError> {
        let universe: Vec<&Task> = self.queue.iter().chain(self.finished.iter()).collect();
        let graph = DependencyGraph::from_tasks(&universe)?;
        graph.validate()?;
        drop(universe);

        tracing::info!(
            session_id = %self.session_id,
            total_tasks = self.queue.len(),
            "execution started"
        );
        self.log.record(
            "execution_started",
            None,
            json!({ "total_tasks": self.queue.len() }),
        );

        while !self.queue.is_empty() || !self.active.is_empty() {
            let ready = self.queue.drain_ready(&self.completed_ids);

            if ready.is_empty() && self.active.is_empty() {
                // Unreachable once validate() passed; guards a future
                // readiness regression from becoming an endless loop.
                return Err(SchedulerError::Internal(format!(
                    "{} pending tasks but no runnable candidate",
                    self.queue.len()
                )));
            }

            let ran_any = !ready.is_empty();
            for task in ready {
                self.attempt(task, worker).await?;
            }

            self.reconcile();

            if ran_any {
                let report = self.snapshot();
                self.notify(&report);
            }
        }

        let final_report = self.snapshot();
        self.notify(&final_report);
        tracing::info!(
            session_id = %self.session_id,
            completed = final_report.completed_tasks,
            failed = final_report.failed_tasks,
            "execution finished"
        );
        Ok(final_report)
    }

    /// One attempt of one ready task.
    async fn attempt(&mut self, mut task: Task, worker: &dyn TaskWorker) -> Result<(), SchedulerError> {
        Self::transition(&mut task, TaskStatus::InProgress)?;
        task.started_at = Some(Utc::now());
        tracing::info!(task_id = %task.id, worker_kind = %task.worker_kind, "task started");
        self.log.record(
            "task_started",
            Some(&task.id),
            json!({
                "worker_kind": task.worker_kind,
                "attempt": task.retry_count + 1,
            }),
        );

        match worker.execute(&task).await {
            Ok(payload) => {
                Self::transition(&mut task, TaskStatus::Completed)?;
                task.completed_at = Some(Utc::now());
                task.result = Some(payload);
                tracing::info!(task_id = %task.id, "task completed");
                self.log.record(
                    "task_completed",
                    Some(&task.id),
                    json!({ "deliverables": task.deliverables }),
                );
                self.active.push(task);
            }
            Err(err) => self.handle_failure(task, err)?,
        }

        Ok(())
    }

    /// Retry bookkeeping: a failed attempt is logged on the task; if budget
    /// remains the task goes back to the queue tail, otherwise it fails for
    /// good. A task whose work always fails is attempted exactly
    /// `max_retry_attempts + 1` times.
    fn handle_failure(&mut self, mut task: Task, err: WorkError) -> Result<(), SchedulerError> {
        task.error_log
            .push(format!("{}: {}", Utc::now().to_rfc3339(), err));

        if task.retry_count < task.max_retry_attempts {
            task.retry_count += 1;
            Self::transition(&mut task, TaskStatus::Pending)?;
            tracing::warn!(
                task_id = %task.id,
                retry_count = task.retry_count,
                error = %err,
                "task attempt failed, re-queued"
            );
            self.log.record(
                "task_retry",
                Some(&task.id),
                json!({
                    "retry_count": task.retry_count,
                    "error": err.to_string(),
                }),
            );
            self.queue.push_back(task);
        } else {
            Self::transition(&mut task, TaskStatus::Failed)?;
            task.completed_at = Some(Utc::now());
            tracing::error!(
                task_id = %task.id,
                retry_count = task.retry_count,
                error = %err,
                "task failed, retry budget exhausted"
            );
            self.log.record(
                "task_failed",
                Some(&task.id),
                json!({
                    "retry_count": task.retry_count,
                    "final_error": err.to_string(),
                }),
            );
            self.active.push(task);
        }

        Ok(())
    }

    /// Move finished tasks from the active set into history.
    fn reconcile(&mut self) {
        let (done, still_active): (Vec<Task>, Vec<Task>) =
            std::mem::take(&mut self.active).into_iter().partition(Task::is_finished);
        self.active = still_active;

        for task in done {
            if task.status == TaskStatus::Completed {
                self.completed_ids.insert(task.id.clone());
            }
            self.finished.push(task);
        }
    }

    fn snapshot(&self) -> ExecutionReport {
        let pending: Vec<&Task> = self.queue.iter().collect();
        let active: Vec<&Task> = self.active.iter().collect();
        report::snapshot(&self.session_id, &pending, &active, &self.finished)
    }

    /// Deliver a report to every observer, isolating failures: a failing
    /// observer is logged and does not affect the loop or later observers.
    fn notify(&mut self, report: &ExecutionReport) {
        let mut failures: Vec<(String, String)> = Vec::new();

        for (name, observer) in &self.observers {
            if let Err(e) = observer.on_progress(report) {
                tracing::warn!(observer = %name, error = %e, "progress observer failed");
                failures.push((name.clone(), e.to_string()));
            }
        }

        for (name, error) in failures {
            self.log.record(
                "observer_failed",
                None,
                json!({ "observer": name, "error": error }),
            );
        }
    }

    fn transition(task: &mut Task, to: TaskStatus) -> Result<(), SchedulerError> {
        task.transition(to).map_err(|source: TransitionError| {
            SchedulerError::Transition {
                task_id: task.id.clone(),
                source,
            }
        })
    }
}

impl Default for SequentialRunner {
    fn default() -> Self {
        Self::new()
    }
}
