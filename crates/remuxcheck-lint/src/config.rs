//! Validation policy.

use remuxcheck_paste::CodecTable;
use serde::{Deserialize, Serialize};

/// Default tolerance, in years, between a movie name's year and the
/// looked-up release year.
pub const DEFAULT_MOVIE_YEAR_OFFSET: i32 = 1;

/// Immutable policy handed to every rule.
///
/// Missing keys fall back to their defaults when deserialized, so a
/// configuration file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Release group appended to filenames for internal submissions.
    pub release_group: String,

    /// Calling contexts whose submissions are internal releases.
    pub internal_channels: Vec<String>,

    /// Filename cut tokens tried in order, e.g. `"Extended"`.
    pub cuts: Vec<String>,

    /// Accepted distance (inclusive) between movie name year and looked-up year.
    pub movie_year_offset: i32,

    /// Words never reported as misspelled.
    pub misspelling_ignore: Vec<String>,

    /// Latest mkvtoolnix version line, used instead of asking the version source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mkvtoolnix_version_override: Option<String>,

    pub codecs: CodecTable,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            release_group: String::new(),
            internal_channels: Vec::new(),
            cuts: Vec::new(),
            movie_year_offset: DEFAULT_MOVIE_YEAR_OFFSET,
            misspelling_ignore: Vec::new(),
            mkvtoolnix_version_override: None,
            codecs: CodecTable::default(),
        }
    }
}

impl CheckConfig {
    /// Returns true if `channel` is one of the internal channels.
    pub fn is_internal(&self, channel: Option<&str>) -> bool {
        channel.is_some_and(|c| self.internal_channels.iter().any(|i| i == c))
    }

    /// Cut candidates for filename reconstruction: no cut first, then each
    /// configured cut in order.
    pub fn cut_candidates(&self) -> Vec<Option<&str>> {
        std::iter::once(None)
            .chain(self.cuts.iter().map(|c| Some(c.as_str())))
            .collect()
    }

    /// Returns true if `word` is on the misspelling ignore list.
    pub fn ignores_spelling(&self, word: &str) -> bool {
        self.misspelling_ignore.iter().any(|w| w == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.movie_year_offset, 1);
        assert!(!config.is_internal(Some("releases")));
        assert_eq!(config.cut_candidates(), vec![None]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CheckConfig = serde_json::from_str(
            r#"{"release_group": "GRP", "internal_channels": ["internal"], "cuts": ["Extended", "Theatrical"]}"#,
        )
        .unwrap();

        assert_eq!(config.release_group, "GRP");
        assert!(config.is_internal(Some("internal")));
        assert!(!config.is_internal(None));
        assert_eq!(
            config.cut_candidates(),
            vec![None, Some("Extended"), Some("Theatrical")]
        );
        assert_eq!(config.movie_year_offset, 1);
        assert_eq!(config.codecs, CodecTable::default());
    }
}
