use serde::{Deserialize, Serialize};

/// One ranked classification rule: a worker-kind label, the keywords that
/// vote for it, and the advisory hints attached when it wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRule {
    pub label: String,
    pub keywords: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl ClassifyRule {
    fn score(&self, haystack: &str) -> f64 {
        let hits = self
            .keywords
            .iter()
            .filter(|kw| haystack.contains(kw.as_str()))
            .count();
        hits as f64 * self.weight
    }
}

/// Ordered rule table with a fallback label.
///
/// Classification is a pure function: lowercase the description, score every
/// rule by keyword hits times weight, and take the first rule with the
/// highest positive score. No global registry; the table is constructed
/// explicitly (usually from [`ClassifierConfig`](crate::config::ClassifierConfig)).
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<ClassifyRule>,
    default_label: String,
}

impl RuleTable {
    pub fn new(rules: Vec<ClassifyRule>, default_label: impl Into<String>) -> Self {
        Self {
            rules,
            default_label: default_label.into(),
        }
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn rules(&self) -> &[ClassifyRule] {
        &self.rules
    }

    /// Best-matching rule for a free-text description, if any keyword hit.
    pub fn classify(&self, description: &str) -> Option<&ClassifyRule> {
        let haystack = description.to_lowercase();
        let mut best: Option<(&ClassifyRule, f64)> = None;

        for rule in &self.rules {
            let score = rule.score(&haystack);
            if score <= 0.0 {
                continue;
            }
            // Strictly-greater keeps earlier rules ahead on ties.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((rule, score)),
            }
        }

        best.map(|(rule, _)| rule)
    }

    /// Winning label, or the fallback when nothing matches.
    pub fn label_for(&self, description: &str) -> &str {
        self.classify(description)
            .map(|r| r.label.as_str())
            .unwrap_or(&self.default_label)
    }
}

impl Default for RuleTable {
    /// Built-in capability table for the stock worker kinds.
    fn default() -> Self {
        let rule = |label: &str, keywords: &[&str], skills: &[&str], commands: &[&str]| {
            ClassifyRule {
                label: label.to_string(),
                keywords: keywords.iter().map(|s| s.to_string()).collect(),
                weight: 1.0,
                skills: skills.iter().map(|s| s.to_string()).collect(),
                commands: commands.iter().map(|s| s.to_string()).collect(),
            }
        };

        Self::new(
            vec![
                rule(
                    "codebase-locator",
                    &["locate", "find", "discover", "search", "where"],
                    &["search-strategies"],
                    &["/research_codebase"],
                ),
                rule(
                    "codebase-analyzer",
                    &["analyze", "review", "understand", "document", "architecture"],
                    &["code-analysis"],
                    &["/research"],
                ),
                rule(
                    "developer",
                    &["implement", "develop", "build", "refactor", "fix"],
                    &["production-patterns", "framework-patterns"],
                    &["/feature_development", "/component_scaffold"],
                ),
                rule(
                    "security-specialist",
                    &["security", "secure", "vulnerability", "audit", "compliance"],
                    &["security-patterns", "compliance-validation"],
                    &["/security_sast", "/security_hardening"],
                ),
                rule(
                    "backend-architect",
                    &["api", "backend", "service", "scalability", "design"],
                    &["framework-patterns"],
                    &["/create_plan"],
                ),
                rule(
                    "researcher",
                    &["research", "investigate", "information", "web"],
                    &["search-strategies"],
                    &["/smart-research"],
                ),
            ],
            "orchestrator",
        )
    }
}

/// Advisory timeout hint from task complexity keywords, in minutes.
pub fn estimate_timeout_minutes(description: &str) -> u64 {
    let haystack = description.to_lowercase();
    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|kw| haystack.contains(kw));

    if contains_any(&["implement", "develop", "build"]) {
        45
    } else if contains_any(&["security", "validate", "test"]) {
        30
    } else {
        15
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classification_is_pure_and_case_insensitive() {
        let table = RuleTable::default();
        assert_eq!(table.label_for("Analyze the architecture"), "codebase-analyzer");
        assert_eq!(table.label_for("analyze the architecture"), "codebase-analyzer");
    }

    #[test]
    fn unmatched_description_falls_back_to_default() {
        let table = RuleTable::default();
        assert_eq!(table.label_for("completely unrelated gibberish"), "orchestrator");
    }

    #[test]
    fn higher_hit_count_outranks_single_hit() {
        let table = RuleTable::default();
        // "implement" + "build" beats a lone "review".
        assert_eq!(
            table.label_for("implement and build the module, then review"),
            "developer"
        );
    }

    #[test]
    fn weight_breaks_hit_count_parity() {
        let table = RuleTable::new(
            vec![
                ClassifyRule {
                    label: "light".to_string(),
                    keywords: vec!["alpha".to_string()],
                    weight: 1.0,
                    skills: Vec::new(),
                    commands: Vec::new(),
                },
                ClassifyRule {
                    label: "heavy".to_string(),
                    keywords: vec!["beta".to_string()],
                    weight: 2.0,
                    skills: Vec::new(),
                    commands: Vec::new(),
                },
            ],
            "fallback",
        );
        assert_eq!(table.label_for("alpha beta"), "heavy");
    }

    #[test]
    fn earlier_rule_wins_exact_tie() {
        let table = RuleTable::new(
            vec![
                ClassifyRule {
                    label: "first".to_string(),
                    keywords: vec!["kw".to_string()],
                    weight: 1.0,
                    skills: Vec::new(),
                    commands: Vec::new(),
                },
                ClassifyRule {
                    label: "second".to_string(),
                    keywords: vec!["kw".to_string()],
                    weight: 1.0,
                    skills: Vec::new(),
                    commands: Vec::new(),
                },
            ],
            "fallback",
        );
        assert_eq!(table.label_for("kw"), "first");
    }

    #[test]
    fn timeout_heuristic_breakpoints() {
        assert_eq!(estimate_timeout_minutes("implement the parser"), 45);
        assert_eq!(estimate_timeout_minutes("validate the release"), 30);
        assert_eq!(estimate_timeout_minutes("summarize notes"), 15);
    }
}
