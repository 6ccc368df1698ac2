//! conductor-core: task dependency tracking, sequential execution, and
//! progress reporting for agent work sessions.
//!
//! A session declares [`task::Task`]s with named dependencies, hands them to
//! a [`sched::SequentialRunner`] together with a [`sched::TaskWorker`]
//! callback, and observes progress through [`report::ExecutionReport`]
//! snapshots. The full session (tasks, execution log, summary) can be
//! exported as a single JSON document.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod plan;
pub mod report;
pub mod sched;
pub mod session;
pub mod task;
