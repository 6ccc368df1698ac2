pub mod transitions;
pub mod types;

pub use transitions::{StatusTransition, TransitionError};
pub use types::{Task, TaskLike, TaskPriority, TaskStatus};
