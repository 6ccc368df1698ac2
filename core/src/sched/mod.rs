//! Task dependency tracking and sequential execution.
//!
//! The pipeline mirrors how a session runs end to end:
//!
//! ```text
//! Vec<Task>
//!   ↓
//! DependencyGraph::from_tasks()
//!   ↓
//! DependencyGraph::validate()   → duplicates, dangling deps, cycles
//!   ↓
//! SequentialRunner::run(worker) → drain ready set, attempt, retry/fail
//!   ↓
//! ExecutionReport per tick      → registered observers
//! ```
//!
//! Execution is strictly single-threaded: one mutator (the runner), ready
//! tasks attempted in declaration order, no priority-based reordering.

pub mod graph;
pub mod ready;
pub mod runner;
pub mod worker;

pub use graph::DependencyGraph;
pub use ready::ReadyQueue;
pub use runner::SequentialRunner;
pub use worker::{worker_fn, TaskWorker, WorkError};
