//! Helpers shared by rules of several sections.

use regex::Regex;
use remuxcheck_paste::{GeneralInfo, MediaInfoReport};
use std::sync::OnceLock;

static MOVIE_NAME_RE: OnceLock<Regex> = OnceLock::new();
static TV_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// `Name (YYYY)`.
pub(crate) fn movie_name_regex() -> &'static Regex {
    MOVIE_NAME_RE.get_or_init(|| Regex::new(r"^.+\(\d{4}\)$").expect("invalid regex pattern"))
}

/// `Name - S01E01`, `Name - S01E01E02 - Episode`.
pub(crate) fn tv_name_regex() -> &'static Regex {
    TV_NAME_RE
        .get_or_init(|| Regex::new(r"^.+\s-\sS\d{2}(E\d{2})+.*$").expect("invalid regex pattern"))
}

/// Movie name of the first General section.
pub(crate) fn movie_name(mediainfo: &MediaInfoReport) -> Option<&str> {
    mediainfo.general().and_then(|g| g.movie_name.as_deref())
}

/// Decides whether the release is a movie or a TV show.
///
/// A TMDb id of the form `movie/...` or `tv/...` decides; otherwise a movie
/// name in TV episode format means TV. Movie is assumed by default.
pub(crate) fn is_movie(general: Option<&GeneralInfo>) -> bool {
    let Some(general) = general else {
        return true;
    };
    if let Some(tmdb) = general.tmdb.as_deref() {
        if tmdb.starts_with("movie/") {
            return true;
        }
        if tmdb.starts_with("tv/") {
            return false;
        }
    }
    !general
        .movie_name
        .as_deref()
        .is_some_and(|name| tv_name_regex().is_match(name))
}

/// Returns true if a track title names a commentary.
pub(crate) fn is_commentary(title: &str) -> bool {
    title.to_lowercase().contains("commentary")
}

/// `"audio"` -> `"Audio"`.
pub(crate) fn capitalize(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses the number a MediaInfo value leads with, ignoring thousands
/// separators: `"23.976 (24000/1001) FPS"` -> 23.976, `"1 509 kb/s"` -> 1509.
pub(crate) fn number(value: &str) -> Option<f64> {
    let start = value.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let mut text = String::new();
    let mut chars = value[start..].chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() || c == '.' {
            text.push(c);
        } else if c == ' ' && chars.peek().is_some_and(char::is_ascii_digit) {
            continue;
        } else {
            break;
        }
    }
    text.parse().ok()
}

/// Formats a number without a fractional part when it is integral:
/// 25.0 -> "25", 23.976 -> "23.976".
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_regexes() {
        assert!(movie_name_regex().is_match("Heat (1995)"));
        assert!(!movie_name_regex().is_match("Heat (1995) "));
        assert!(tv_name_regex().is_match("The Wire - S01E01"));
        assert!(tv_name_regex().is_match("The Wire - S01E01E02 - The Target"));
        assert!(!tv_name_regex().is_match("The Wire S01E01"));
    }

    #[test]
    fn test_is_movie() {
        let tv_by_id = GeneralInfo {
            tmdb: Some("tv/1438".to_string()),
            movie_name: Some("The Wire (2002)".to_string()),
            ..Default::default()
        };
        assert!(!is_movie(Some(&tv_by_id)));

        let tv_by_name = GeneralInfo {
            movie_name: Some("The Wire - S01E01".to_string()),
            ..Default::default()
        };
        assert!(!is_movie(Some(&tv_by_name)));
        assert!(is_movie(None));
    }

    #[test]
    fn test_number() {
        assert_eq!(number("23.976 (24000/1001) FPS"), Some(23.976));
        assert_eq!(number("1 509 kb/s"), Some(1509.0));
        assert_eq!(number("6 channels"), Some(6.0));
        assert_eq!(number("48.0 kHz"), Some(48.0));
        assert_eq!(number("unknown"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(23.976), "23.976");
        assert_eq!(capitalize("audio"), "Audio");
    }
}
