//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `conductor_core::api` instead of reaching into
//! internal modules.

pub use crate::classify::{estimate_timeout_minutes, ClassifyRule, RuleTable};
pub use crate::config::{load_default, AppConfig, ClassifierConfig, LoggingConfig, SessionConfig};
pub use crate::error::{CliError, SchedulerError};
pub use crate::plan::{build_plan, load_plan, PhaseSpec, PlanDocument, TaskSpec};
pub use crate::report::{
    ExecutionReport, ObserverError, ProgressMonitor, ProgressObserver,
};
pub use crate::sched::{
    worker_fn, DependencyGraph, ReadyQueue, SequentialRunner, TaskWorker, WorkError,
};
pub use crate::session::{ExecutionLog, LogEvent, SessionExport, SessionSummary};
pub use crate::task::{Task, TaskLike, TaskPriority, TaskStatus, TransitionError};
