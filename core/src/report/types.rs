use std::collections::BTreeMap;

use serde::Serialize;

/// Immutable snapshot of session progress, regenerated on every reporting
/// tick and handed to each registered observer.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub session_id: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub blocked_tasks: usize,

    /// Completed share of the full universe, as a percentage.
    pub overall_progress: f64,

    /// Coarse heuristic label, not a state-machine state. One of
    /// "Discovery & Planning", "Core Implementation",
    /// "Validation & Security", "Integration & Completion".
    pub current_phase: String,

    pub next_actions: Vec<String>,
    pub issues_encountered: Vec<String>,
    pub recommendations: Vec<String>,
    pub resource_usage: BTreeMap<String, String>,

    /// ISO-8601 generation time.
    pub timestamp: String,
}
