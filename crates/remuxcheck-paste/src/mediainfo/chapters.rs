//! `Menu` section chapter lines.

use super::records::{Chapter, ChapterTitle};
use regex::Regex;
use std::sync::OnceLock;

static LANGUAGE_PREFIX_RE: OnceLock<Regex> = OnceLock::new();

fn language_prefix_regex() -> &'static Regex {
    LANGUAGE_PREFIX_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z]{2})?:").expect("invalid regex pattern")
    })
}

/// Splits a chapter value into its titles.
///
/// `"en:Chapter 01 - de:Kapitel 01"` yields two titles. The value is only
/// split on `" - "` where the next fragment starts with a language prefix,
/// so titles such as `"Act 1 - The Beginning"` stay whole.
fn split_titles(value: &str) -> Vec<&str> {
    let mut titles = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(offset) = value[search..].find(" - ") {
        let at = search + offset;
        let next = &value[at + 3..];
        if language_prefix_regex().is_match(next) {
            titles.push(&value[start..at]);
            start = at + 3;
        }
        search = at + 3;
    }
    titles.push(&value[start..]);
    titles
}

fn chapter_title(fragment: &str) -> ChapterTitle {
    match fragment.split_once(':') {
        Some((language, title)) => ChapterTitle {
            language: Some(language.trim().to_string()),
            title: title.trim().to_string(),
        },
        None => ChapterTitle {
            language: None,
            title: fragment.trim().to_string(),
        },
    }
}

/// Parses one menu line, `"<time> : [<lang>:]<title>"`.
///
/// A line without the `" : "` separator yields a chapter with a time and no
/// titles.
pub(crate) fn parse_chapter(line: &str) -> Chapter {
    match line.split_once(" : ") {
        Some((time, value)) => {
            let titles = split_titles(value).into_iter().map(chapter_title).collect();
            Chapter::new(time.trim(), titles)
        }
        None => Chapter::new(line.trim(), Vec::new()),
    }
}
