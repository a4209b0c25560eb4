//! Word-list spell checker.

use super::{ServiceError, SpellChecker};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Accepts words found in a dictionary word list.
///
/// Loads either a plain list (one word per line) or a hunspell `.dic` file:
/// a leading entry count line is skipped and `/FLAGS` suffixes are dropped.
/// A word also passes when its lowercase form is listed, so sentence-initial
/// capitals are not flagged.
#[derive(Debug, Clone, Default)]
pub struct WordListSpellChecker {
    words: HashSet<String>,
}

impl WordListSpellChecker {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses dictionary text.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();

        if lines
            .peek()
            .is_some_and(|first| first.chars().all(|c| c.is_ascii_digit()))
        {
            lines.next();
        }

        let words = lines
            .map(|line| line.split('/').next().unwrap_or(line).trim())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();

        Self { words }
    }

    /// Loads a dictionary file.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServiceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let checker = Self::parse(&text);
        debug!(path = %path.display(), words = checker.len(), "loaded dictionary");
        Ok(checker)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SpellChecker for WordListSpellChecker {
    fn check(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }
}
