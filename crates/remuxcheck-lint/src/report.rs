//! Validation report types for structured output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The rule is satisfied.
    Correct,
    /// Deviation that needs human judgement.
    Warning,
    /// Convention violation, must be fixed.
    Error,
    /// Non-actionable observation.
    Info,
    /// The rule itself could not run.
    Fail,
}

impl Severity {
    /// Upper-case tag used when rendering an entry.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Correct => "CORRECT",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Info => "INFO",
            Severity::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One line of a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Rule that produced the entry (e.g. "audio/conversions").
    ///
    /// Stamped by the registry; empty while a rule builds the entry.
    #[serde(default)]
    pub rule_id: String,

    pub severity: Severity,

    pub message: String,

    /// Untallied supporting text: a diff hint, a track listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Whether the entry counts towards the tally.
    pub recorded: bool,
}

impl ReportEntry {
    /// Creates a recorded entry.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: String::new(),
            severity,
            message: message.into(),
            detail: None,
            recorded: true,
        }
    }

    pub fn correct(message: impl Into<String>) -> Self {
        Self::new(Severity::Correct, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(Severity::Fail, message)
    }

    /// Builder method to attach detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builder method to exclude the entry from the tally.
    pub fn unrecorded(mut self) -> Self {
        self.recorded = false;
        self
    }

    /// Builder method to set the producing rule.
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = rule_id.into();
        self
    }
}

/// Counts of recorded entries.
///
/// Only ever incremented; `fail` entries are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: usize,
    pub warning: usize,
    pub error: usize,
    pub info: usize,
}

impl Tally {
    /// Counts one entry.
    pub fn record(&mut self, entry: &ReportEntry) {
        if !entry.recorded {
            return;
        }
        match entry.severity {
            Severity::Correct => self.correct += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
            Severity::Info => self.info += 1,
            Severity::Fail => {}
        }
    }
}

/// Heading a group of rules is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSection {
    Metadata,
    VideoAudio,
    Text,
    Chapters,
}

impl RuleSection {
    /// Heading text.
    pub fn title(self) -> &'static str {
        match self {
            RuleSection::Metadata => "Metadata",
            RuleSection::VideoAudio => "Video & Audio Tracks",
            RuleSection::Text => "Text Tracks",
            RuleSection::Chapters => "Chapters",
        }
    }
}

/// Entries of one section, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: RuleSection,
    pub entries: Vec<ReportEntry>,
}

/// Complete report of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub sections: Vec<SectionReport>,
    pub tally: Tally,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry under `section` and updates the tally.
    ///
    /// Consecutive entries of the same section share one heading.
    pub fn add_entry(&mut self, section: RuleSection, entry: ReportEntry) {
        self.tally.record(&entry);
        match self.sections.last_mut() {
            Some(last) if last.section == section => last.entries.push(entry),
            _ => self.sections.push(SectionReport {
                section,
                entries: vec![entry],
            }),
        }
    }

    /// All entries in report order.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Entries produced by one rule.
    pub fn entries_for<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a ReportEntry> + 'a {
        self.entries().filter(move |e| e.rule_id == rule_id)
    }

    /// Returns true if any recorded error was reported.
    pub fn has_errors(&self) -> bool {
        self.tally.error > 0
    }

    /// Number of rules that could not run.
    pub fn failure_count(&self) -> usize {
        self.entries().filter(|e| e.severity == Severity::Fail).count()
    }
}
