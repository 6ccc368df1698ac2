//! Report derivation: a pure function of the (pending, active, finished)
//! partition of the task universe.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::task::{Task, TaskStatus};

use super::types::ExecutionReport;

/// Phase breakpoints over `completed / total`: no completions yet, under
/// 50%, under 75%, and everything past that. A labeling heuristic only.
pub fn phase_label(completed: usize, total: usize) -> &'static str {
    if completed == 0 || total == 0 {
        return "Discovery & Planning";
    }
    let ratio = completed as f64 / total as f64;
    if ratio < 0.5 {
        "Core Implementation"
    } else if ratio < 0.75 {
        "Validation & Security"
    } else {
        "Integration & Completion"
    }
}

/// Build a report from the current partition. Read-only: no task is
/// mutated, and calling this twice on the same inputs yields the same
/// counts.
pub fn snapshot(
    session_id: &str,
    pending: &[&Task],
    active: &[&Task],
    finished: &[Task],
) -> ExecutionReport {
    let total = pending.len() + active.len() + finished.len();
    let completed = finished
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let failed = finished
        .iter()
        .filter(|t| t.status == TaskStatus::Failed)
        .count();
    let blocked = active
        .iter()
        .filter(|t| t.status == TaskStatus::Blocked)
        .count();

    let overall_progress = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ExecutionReport {
        session_id: session_id.to_string(),
        total_tasks: total,
        completed_tasks: completed,
        failed_tasks: failed,
        blocked_tasks: blocked,
        overall_progress,
        current_phase: phase_label(completed, total).to_string(),
        next_actions: next_actions(pending, active),
        issues_encountered: issues(finished),
        recommendations: recommendations(finished),
        resource_usage: resource_usage(finished),
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn next_actions(pending: &[&Task], active: &[&Task]) -> Vec<String> {
    if !pending.is_empty() {
        pending
            .iter()
            .take(3)
            .map(|t| format!("Execute {}", t.description))
            .collect()
    } else if !active.is_empty() {
        active
            .iter()
            .map(|t| format!("Complete {}", t.description))
            .collect()
    } else {
        vec![
            "Generate final deliverables".to_string(),
            "Prepare session handoff".to_string(),
        ]
    }
}

/// Last logged error of every finished task that has one, in finish order.
fn issues(finished: &[Task]) -> Vec<String> {
    finished
        .iter()
        .filter_map(|t| t.error_log.last().cloned())
        .collect()
}

fn recommendations(finished: &[Task]) -> Vec<String> {
    let mut out = Vec::new();

    if finished.iter().any(|t| t.retry_count > 0) {
        out.push("Consider increasing timeout hints for retry-prone tasks".to_string());
    }
    if finished.iter().any(|t| t.status == TaskStatus::Failed) {
        out.push("Review failed task error logs before re-planning".to_string());
    }

    out
}

fn resource_usage(finished: &[Task]) -> BTreeMap<String, String> {
    let workers: BTreeSet<&str> = finished.iter().map(|t| t.worker_kind.as_str()).collect();
    let total_retries: u32 = finished.iter().map(|t| t.retry_count).sum();
    let attempts: u32 = finished.iter().map(|t| t.retry_count + 1).sum();
    let retry_rate = if attempts > 0 {
        total_retries as f64 / attempts as f64 * 100.0
    } else {
        0.0
    };

    let mut usage = BTreeMap::new();
    usage.insert("workers_utilized".to_string(), workers.len().to_string());
    usage.insert("total_attempts".to_string(), attempts.to_string());
    usage.insert("retry_rate".to_string(), format!("{retry_rate:.1}%"));
    usage
}
