use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use conductor_core::api::{
    AppConfig, ProgressMonitor, SequentialRunner, Task, TaskWorker, WorkError,
};
use conductor_core::error::CliError;
use conductor_core::plan;

use super::cli::RunArgs;

/// Stand-in worker: waits the configured delay and reports the declared
/// deliverables as produced. Real integrations supply their own
/// [`TaskWorker`] against the library instead.
struct SimulatedWorker {
    delay: Duration,
}

#[async_trait]
impl TaskWorker for SimulatedWorker {
    async fn execute(&self, task: &Task) -> Result<serde_json::Value, WorkError> {
        tokio::time::sleep(self.delay).await;
        Ok(json!({
            "status": "success",
            "deliverables": task.deliverables,
        }))
    }
}

pub async fn run_cmd(args: RunArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let session_id = args
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session_{}", uuid::Uuid::new_v4()));

    let rules = cfg.classifier.rule_table();
    let tasks = plan::load_plan(Path::new(&args.plan), &session_id, &rules)
        .map_err(|e| CliError::Plan(e.to_string()))?;
    let total = tasks.len();

    let mut runner = SequentialRunner::with_session_id(session_id);
    runner.add_tasks(tasks);

    let show_bar = !args.quiet && !args.json && atty::is(atty::Stream::Stderr);
    runner.register_observer("progress-bar", Box::new(ProgressMonitor::new(total, show_bar)));

    let worker = SimulatedWorker {
        delay: Duration::from_millis(args.work_delay_ms),
    };
    let report = runner.run(&worker).await?;

    if cfg.session.export_enabled || args.output.is_some() {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| cfg.session.export_path.clone());
        runner.export().save_to_file(&path)?;
        tracing::info!(path = %path, "session export written");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?);
    } else {
        println!(
            "{}: {}/{} tasks completed, {} failed ({:.1}%) — {}",
            report.session_id,
            report.completed_tasks,
            report.total_tasks,
            report.failed_tasks,
            report.overall_progress,
            report.current_phase,
        );
        for issue in &report.issues_encountered {
            println!("  issue: {issue}");
        }
    }

    Ok(if report.failed_tasks == 0 { 0 } else { 1 })
}
