//! Turning declared work into runnable task lists.

pub mod builder;
pub mod file;

pub use builder::{build_plan, PhaseSpec};
pub use file::{load_plan, PlanDocument, TaskSpec};
