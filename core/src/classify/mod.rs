//! Worker-kind classification as an explicit, testable ranked-rule table.

pub mod rules;

pub use rules::{estimate_timeout_minutes, ClassifyRule, RuleTable};
