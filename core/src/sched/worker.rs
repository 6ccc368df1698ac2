use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

use crate::task::Task;

/// Errors raised by work callbacks.
///
/// Every variant is treated as transient by the runner: the failed attempt
/// is logged against the task and the retry budget decides what happens next.
#[derive(Error, Debug)]
pub enum WorkError {
    #[error("task rejected: {0}")]
    Rejected(String),

    #[error("work failed: {0}")]
    Failed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Work callback invoked by the runner once per attempt.
///
/// Implementations receive the task as it will be executed (status already
/// `in_progress`) and return a result payload on success. Invocation is
/// strictly sequential; an implementation is never called concurrently with
/// itself.
#[async_trait]
pub trait TaskWorker: Send + Sync {
    async fn execute(&self, task: &Task) -> Result<serde_json::Value, WorkError>;
}

/// Adapter turning a plain async closure into a [`TaskWorker`].
pub struct FnWorker<F>(F);

/// Wrap an async closure as a worker.
///
/// ```no_run
/// # use conductor_core::sched::{worker_fn, WorkError};
/// # use conductor_core::task::Task;
/// let worker = worker_fn(|task: Task| async move {
///     Ok::<_, WorkError>(serde_json::json!({ "echo": task.id }))
/// });
/// ```
pub fn worker_fn<F, Fut>(f: F) -> FnWorker<F>
where
    F: Fn(Task) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, WorkError>> + Send,
{
    FnWorker(f)
}

#[async_trait]
impl<F, Fut> TaskWorker for FnWorker<F>
where
    F: Fn(Task) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value, WorkError>> + Send,
{
    async fn execute(&self, task: &Task) -> Result<serde_json::Value, WorkError> {
        (self.0)(task.clone()).await
    }
}
