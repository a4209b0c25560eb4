//! Rule registry and the per-rule failure boundary.

use crate::report::{ReportEntry, RuleSection, ValidationReport};
use crate::rules::{audio, chapters, metadata, text, video, CheckContext, CheckRule};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Registry of all available check rules, in execution order.
pub struct RuleRegistry {
    rules: Vec<Box<dyn CheckRule>>,
    disabled_rules: HashSet<String>,
    enabled_only: Option<HashSet<String>>,
}

/// Metadata about a rule for documentation/introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub section: RuleSection,
    pub description: String,
    pub enabled: bool,
}

impl RuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            disabled_rules: HashSet::new(),
            enabled_only: None,
        }
    }

    /// Creates a registry with every rule registered in report order.
    pub fn default_rules() -> Self {
        let mut registry = Self::new();

        for rule in metadata::all_rules() {
            registry.register(rule);
        }
        for rule in video::all_rules() {
            registry.register(rule);
        }
        for rule in audio::all_rules() {
            registry.register(rule);
        }
        for rule in text::all_rules() {
            registry.register(rule);
        }
        for rule in chapters::all_rules() {
            registry.register(rule);
        }

        registry
    }

    /// Registers a new rule after the existing ones.
    pub fn register(&mut self, rule: Box<dyn CheckRule>) {
        self.rules.push(rule);
    }

    /// Disables a rule by ID.
    pub fn disable_rule(&mut self, rule_id: &str) {
        self.disabled_rules.insert(rule_id.to_string());
    }

    /// Enables only the specified rules (disables all others).
    pub fn enable_only(&mut self, rule_ids: &[&str]) {
        self.enabled_only = Some(rule_ids.iter().map(|s| s.to_string()).collect());
    }

    /// Returns all registered rules.
    pub fn rules(&self) -> &[Box<dyn CheckRule>] {
        &self.rules
    }

    /// Returns rule metadata for documentation/introspection.
    pub fn rule_metadata(&self) -> Vec<RuleMetadata> {
        self.rules
            .iter()
            .map(|r| RuleMetadata {
                id: r.id().to_string(),
                section: r.section(),
                description: r.description().to_string(),
                enabled: self.is_rule_enabled(r.id()),
            })
            .collect()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if `rule_id` names a registered rule.
    pub fn contains(&self, rule_id: &str) -> bool {
        self.rules.iter().any(|r| r.id() == rule_id)
    }

    /// Checks if a rule is enabled.
    fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.disabled_rules.contains(rule_id) {
            return false;
        }
        if let Some(ref enabled) = self.enabled_only {
            return enabled.contains(rule_id);
        }
        true
    }

    /// Runs every enabled rule in order and collects their entries.
    ///
    /// A rule that returns an error or panics contributes exactly one `fail`
    /// entry carrying its failure message; the rules after it still run.
    pub fn run(&self, ctx: &CheckContext) -> ValidationReport {
        let mut report = ValidationReport::new();

        for rule in &self.rules {
            if !self.is_rule_enabled(rule.id()) {
                continue;
            }

            debug!(rule = rule.id(), "running rule");
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(ctx)));

            let entries = match outcome {
                Ok(Ok(entries)) => entries,
                Ok(Err(failure)) => {
                    warn!(rule = rule.id(), error = %failure, "rule failed");
                    vec![ReportEntry::fail(rule.failure_message()).with_detail(failure.to_string())]
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(rule = rule.id(), panic = %message, "rule panicked");
                    vec![ReportEntry::fail(rule.failure_message()).with_detail(message)]
                }
            };

            debug!(rule = rule.id(), entries = entries.len(), "rule finished");
            for entry in entries {
                report.add_entry(rule.section(), entry.with_rule_id(rule.id()));
            }
        }

        report
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_string()
    }
}
