pub mod export;
pub mod log;

pub use export::{SessionExport, SessionSummary};
pub use log::{ExecutionLog, LogEvent};
