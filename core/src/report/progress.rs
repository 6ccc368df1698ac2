use indicatif::{ProgressBar, ProgressStyle};

use super::observer::{ObserverError, ProgressObserver};
use super::types::ExecutionReport;

/// Visual progress observer backed by an indicatif bar.
///
/// Position tracks `completed + failed`; the message shows the current
/// phase label. Construct disabled for quiet or non-tty runs.
pub struct ProgressMonitor {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressMonitor {
    pub fn new(total_tasks: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let bar = ProgressBar::new(total_tasks as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░  "),
        );
        bar.set_message("Starting...");

        Self { bar, enabled: true }
    }

    /// Clear the bar without a completion message.
    pub fn clear(&self) {
        if self.enabled {
            self.bar.finish_and_clear();
        }
    }
}

impl ProgressObserver for ProgressMonitor {
    fn on_progress(&self, report: &ExecutionReport) -> Result<(), ObserverError> {
        if !self.enabled {
            return Ok(());
        }

        let finished = (report.completed_tasks + report.failed_tasks) as u64;
        self.bar.set_position(finished);
        self.bar.set_message(report.current_phase.clone());

        if finished as usize >= report.total_tasks && report.total_tasks > 0 {
            let msg = if report.failed_tasks == 0 {
                "✅ All tasks completed"
            } else {
                "❌ Finished with failures"
            };
            self.bar.finish_with_message(msg.to_string());
        }

        Ok(())
    }
}
