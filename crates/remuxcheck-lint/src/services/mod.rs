//! External collaborators consumed by the rules.
//!
//! Every service is a trait so callers can plug in network-backed adapters.
//! [`Services::default`] wires the offline implementations: a built-in
//! ISO-639-1 table, a heuristic name extractor, a keyword language detector,
//! and "unavailable" stand-ins for metadata, people and version lookups.

mod detect;
mod iso639;
mod names;
mod offline;
mod spelling;
pub mod testing;

pub use detect::KeywordLanguageDetector;
pub use iso639::Iso639Table;
pub use names::CapitalizedNameExtractor;
pub use offline::{UnavailableMetadata, UnavailablePeople, UnavailableVersions};
pub use spelling::WordListSpellChecker;

use serde::{Deserialize, Serialize};

/// Errors reported by external services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The service could not be reached or is not configured.
    #[error("{0} is unavailable")]
    Unavailable(String),

    /// The service rejected the identifier.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// The code is not in the language table.
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Metadata database an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    Imdb,
    Tmdb,
}

impl IdSource {
    pub fn label(self) -> &'static str {
        match self {
            IdSource::Imdb => "IMDb",
            IdSource::Tmdb => "TMDb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

/// Title and year as known to a metadata database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub title: String,
    pub year: Option<i32>,
}

/// An ISO-639 language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// Two-letter part 1 code.
    pub code: String,
    /// English name.
    pub name: String,
}

/// Looks up a movie or TV show by database identifier.
pub trait MetadataLookup: Send + Sync {
    fn lookup(&self, source: IdSource, id: &str, kind: MediaKind) -> Result<TitleRecord, ServiceError>;
}

/// Searches a people database by name.
pub trait PeopleSearch: Send + Sync {
    /// Database name used in report messages (e.g. "TMDb").
    fn name(&self) -> &str;

    /// Names of the people matching the query.
    fn search(&self, name: &str) -> Result<Vec<String>, ServiceError>;
}

/// Spell-check oracle for one dictionary.
pub trait SpellChecker: Send + Sync {
    /// Returns true if `word` is spelled correctly.
    fn check(&self, word: &str) -> bool;
}

/// Named-entity (person name) extraction.
pub trait NameExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Natural-language detection.
pub trait LanguageDetector: Send + Sync {
    /// ISO-639-1 code of the detected language, `None` when undetectable.
    fn detect(&self, text: &str) -> Option<String>;
}

/// ISO-639 code table.
pub trait LanguageTable: Send + Sync {
    /// Resolves a part 1 code; unknown codes are an error.
    fn lookup(&self, code: &str) -> Result<Language, ServiceError>;
}

/// Source of the latest mkvtoolnix release line,
/// e.g. `Version 57.0.0 "Till The End" 2021-05-22`.
pub trait VersionSource: Send + Sync {
    fn latest_version_line(&self) -> Result<String, ServiceError>;
}

/// The set of services one validation pass uses.
pub struct Services {
    pub metadata: Box<dyn MetadataLookup>,
    /// People databases, searched in order.
    pub people: Vec<Box<dyn PeopleSearch>>,
    /// Spelling is only checked when a dictionary is configured.
    pub spelling: Option<Box<dyn SpellChecker>>,
    pub names: Box<dyn NameExtractor>,
    pub language_detector: Box<dyn LanguageDetector>,
    pub languages: Box<dyn LanguageTable>,
    pub versions: Box<dyn VersionSource>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            metadata: Box::new(UnavailableMetadata),
            people: vec![
                Box::new(UnavailablePeople::new("TMDb")),
                Box::new(UnavailablePeople::new("IMDb")),
            ],
            spelling: None,
            names: Box::new(CapitalizedNameExtractor::default()),
            language_detector: Box::new(KeywordLanguageDetector),
            languages: Box::new(Iso639Table),
            versions: Box::new(UnavailableVersions),
        }
    }
}

impl Services {
    /// Offline services.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: impl MetadataLookup + 'static) -> Self {
        self.metadata = Box::new(metadata);
        self
    }

    /// Replaces the people databases.
    pub fn with_people(mut self, people: Vec<Box<dyn PeopleSearch>>) -> Self {
        self.people = people;
        self
    }

    pub fn with_spell_checker(mut self, checker: impl SpellChecker + 'static) -> Self {
        self.spelling = Some(Box::new(checker));
        self
    }

    pub fn with_name_extractor(mut self, names: impl NameExtractor + 'static) -> Self {
        self.names = Box::new(names);
        self
    }

    pub fn with_language_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.language_detector = Box::new(detector);
        self
    }

    pub fn with_versions(mut self, versions: impl VersionSource + 'static) -> Self {
        self.versions = Box::new(versions);
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("people", &self.people.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field("spelling", &self.spelling.is_some())
            .finish_non_exhaustive()
    }
}
