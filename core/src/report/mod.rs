pub mod observer;
pub mod progress;
pub mod reporter;
pub mod types;

pub use observer::{ObserverError, ProgressObserver};
pub use progress::ProgressMonitor;
pub use reporter::{phase_label, snapshot};
pub use types::ExecutionReport;
