//! Service doubles with fixed answers.

use super::{
    IdSource, LanguageDetector, MediaKind, MetadataLookup, NameExtractor, PeopleSearch,
    ServiceError, SpellChecker, TitleRecord, VersionSource,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// Metadata lookup answering from a fixed table.
///
/// Ids missing from the table are invalid; `unavailable` sources fail as if
/// the database could not be reached.
#[derive(Debug, Default)]
pub struct FixedMetadata {
    records: BTreeMap<(IdSource, String), TitleRecord>,
    unavailable: BTreeSet<IdSource>,
}

impl FixedMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, source: IdSource, id: &str, title: &str, year: Option<i32>) -> Self {
        self.records.insert(
            (source, id.to_string()),
            TitleRecord {
                title: title.to_string(),
                year,
            },
        );
        self
    }

    pub fn with_unavailable(mut self, source: IdSource) -> Self {
        self.unavailable.insert(source);
        self
    }
}

impl MetadataLookup for FixedMetadata {
    fn lookup(&self, source: IdSource, id: &str, _kind: MediaKind) -> Result<TitleRecord, ServiceError> {
        if self.unavailable.contains(&source) {
            return Err(ServiceError::Unavailable(source.label().to_string()));
        }
        self.records
            .get(&(source, id.to_string()))
            .cloned()
            .ok_or_else(|| ServiceError::InvalidId(id.to_string()))
    }
}

/// People database that knows a fixed set of names.
#[derive(Debug)]
pub struct FixedPeople {
    name: String,
    people: Vec<String>,
    available: bool,
}

impl FixedPeople {
    pub fn new(name: &str, people: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            people: people.iter().map(|p| p.to_string()).collect(),
            available: true,
        }
    }

    pub fn unavailable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            people: Vec::new(),
            available: false,
        }
    }
}

impl PeopleSearch for FixedPeople {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, name: &str) -> Result<Vec<String>, ServiceError> {
        if !self.available {
            return Err(ServiceError::Unavailable(self.name.clone()));
        }
        Ok(self
            .people
            .iter()
            .filter(|p| p.contains(name) || name.contains(p.as_str()))
            .cloned()
            .collect())
    }
}

/// Spell checker that records every word it was asked about.
#[derive(Debug, Default)]
pub struct RecordingSpellChecker {
    known: BTreeSet<String>,
    asked: Mutex<Vec<String>>,
}

impl RecordingSpellChecker {
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|w| w.to_string()).collect(),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Words checked so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl SpellChecker for RecordingSpellChecker {
    fn check(&self, word: &str) -> bool {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(word.to_string());
        }
        self.known.contains(word) || self.known.contains(&word.to_lowercase())
    }
}

/// Name extractor returning the listed names that occur in the text.
#[derive(Debug, Default)]
pub struct FixedNames {
    names: Vec<String>,
}

impl FixedNames {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl NameExtractor for FixedNames {
    fn extract(&self, text: &str) -> Vec<String> {
        self.names
            .iter()
            .filter(|n| text.contains(n.as_str()))
            .cloned()
            .collect()
    }
}

/// Language detector with one fixed answer.
#[derive(Debug, Default)]
pub struct FixedLanguage(pub Option<String>);

impl FixedLanguage {
    pub fn new(code: &str) -> Self {
        Self(Some(code.to_string()))
    }

    pub fn undetectable() -> Self {
        Self(None)
    }
}

impl LanguageDetector for FixedLanguage {
    fn detect(&self, _text: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Version source with a fixed latest release line.
#[derive(Debug)]
pub struct FixedVersion(pub String);

impl FixedVersion {
    pub fn new(line: &str) -> Self {
        Self(line.to_string())
    }
}

impl VersionSource for FixedVersion {
    fn latest_version_line(&self) -> Result<String, ServiceError> {
        Ok(self.0.clone())
    }
}
