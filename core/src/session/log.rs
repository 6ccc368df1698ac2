use chrono::{DateTime, Utc};
use serde::Serialize;

/// One timestamped execution event.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub detail: serde_json::Value,
}

/// Append-only in-memory log of a session's execution events.
///
/// Event types currently recorded: `execution_started`, `task_added`,
/// `task_started`, `task_completed`, `task_retry`, `task_failed`,
/// `observer_failed`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ExecutionLog {
    events: Vec<LogEvent>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        event_type: impl Into<String>,
        task_id: Option<&str>,
        detail: serde_json::Value,
    ) {
        self.events.push(LogEvent {
            timestamp: Utc::now(),
            event_type: event_type.into(),
            task_id: task_id.map(str::to_string),
            detail,
        });
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut log = ExecutionLog::new();
        log.record("task_added", Some("t1"), serde_json::json!({}));
        log.record("task_started", Some("t1"), serde_json::json!({}));

        let types: Vec<&str> = log.events().iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["task_added", "task_started"]);
        assert_eq!(log.events()[0].task_id.as_deref(), Some("t1"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut log = ExecutionLog::new();
        log.record("execution_started", None, serde_json::json!({"total": 2}));

        let value = serde_json::to_value(&log).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["event_type"], "execution_started");
    }
}
