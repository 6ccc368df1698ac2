use thiserror::Error;

use super::types::ExecutionReport;

/// Error returned by a progress observer.
///
/// Observer failures are isolated by the runner: the error is logged, the
/// loop continues, and other observers still receive the report.
#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("observer failed: {0}")]
    Failed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability contract for progress consumers.
///
/// Registered and unregistered on the runner by name. `on_progress` is
/// called once per reporting tick with the freshly derived report.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, report: &ExecutionReport) -> Result<(), ObserverError>;
}
