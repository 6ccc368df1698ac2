use serde::{Deserialize, Serialize};

use crate::classify::{ClassifyRule, RuleTable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "conductor_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the whole-session JSON export lands after a run.
    #[serde(default = "default_export_path")]
    pub export_path: String,

    #[serde(default = "default_export_enabled")]
    pub export_enabled: bool,
}

fn default_export_path() -> String {
    "./session_export.json".to_string()
}

fn default_export_enabled() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            export_enabled: default_export_enabled(),
        }
    }
}

/// Classification rules as configuration; empty `rules` means the built-in
/// table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub default_label: Option<String>,

    #[serde(default)]
    pub rules: Vec<ClassifyRule>,
}

impl ClassifierConfig {
    pub fn rule_table(&self) -> RuleTable {
        if self.rules.is_empty() {
            let table = RuleTable::default();
            match &self.default_label {
                Some(label) => RuleTable::new(table.rules().to_vec(), label.clone()),
                None => table,
            }
        } else {
            RuleTable::new(
                self.rules.clone(),
                self.default_label
                    .clone()
                    .unwrap_or_else(|| "orchestrator".to_string()),
            )
        }
    }
}
