//! Keyword-based language detection.
//!
//! Good enough for chapter titles, which are short and repetitive: the
//! script decides non-Latin languages, and Latin text is scored against a
//! small vocabulary per language.

use super::LanguageDetector;
use std::collections::BTreeMap;

/// Vocabulary per language, in tie-break order.
const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "chapter", "the", "and", "of", "to", "in", "is", "a", "end", "credits", "opening",
            "main", "title", "titles", "with", "for", "on", "at", "his", "her", "night", "day",
        ],
    ),
    (
        "de",
        &[
            "kapitel", "der", "die", "das", "und", "ein", "eine", "ist", "mit", "nicht", "auf",
            "abspann", "ende", "im", "zu", "den", "dem", "von",
        ],
    ),
    (
        "fr",
        &[
            "chapitre", "le", "la", "les", "et", "un", "une", "des", "du", "est", "dans", "fin",
            "générique", "au", "sur", "pour",
        ],
    ),
    (
        "es",
        &[
            "capítulo", "capitulo", "el", "los", "las", "y", "una", "del", "en", "fin", "créditos",
            "con", "por", "para",
        ],
    ),
    (
        "it",
        &[
            "capitolo", "il", "lo", "gli", "e", "di", "della", "fine", "titoli", "con", "per",
            "che",
        ],
    ),
    (
        "pt",
        &["capítulo", "o", "os", "as", "e", "um", "uma", "do", "da", "fim", "com", "não"],
    ),
    (
        "nl",
        &["hoofdstuk", "de", "het", "een", "en", "van", "met", "einde", "aftiteling", "niet"],
    ),
    (
        "sv",
        &["kapitel", "och", "en", "ett", "det", "att", "slut", "med", "inte", "är"],
    ),
    (
        "da",
        &["kapitel", "og", "en", "et", "det", "at", "slut", "med", "ikke", "er"],
    ),
    ("fi", &["luku", "ja", "on", "ei", "loppu", "se", "kanssa"]),
    ("pl", &["rozdział", "i", "w", "z", "nie", "na", "koniec", "się"]),
    ("cs", &["kapitola", "a", "v", "na", "je", "se", "konec", "ne"]),
    ("hu", &["fejezet", "a", "az", "és", "egy", "vége", "nem"]),
];

/// Detects the language of short texts from their script and vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordLanguageDetector;

fn script_language(c: char) -> Option<&'static str> {
    let language = match c as u32 {
        0x0370..=0x03FF => "el",
        0x0400..=0x04FF => "ru",
        0x0590..=0x05FF => "he",
        0x0600..=0x06FF => "ar",
        0x0E00..=0x0E7F => "th",
        0x3040..=0x30FF => "ja",
        0xAC00..=0xD7AF | 0x1100..=0x11FF => "ko",
        0x4E00..=0x9FFF => "zh",
        _ => return None,
    };
    Some(language)
}

impl LanguageDetector for KeywordLanguageDetector {
    fn detect(&self, text: &str) -> Option<String> {
        // Kana decides Japanese even when most characters are CJK ideographs.
        let scripts: Vec<&str> = text.chars().filter_map(script_language).collect();
        if !scripts.is_empty() {
            if scripts.contains(&"ja") {
                return Some("ja".to_string());
            }
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for script in scripts {
                *counts.entry(script).or_default() += 1;
            }
            return counts
                .into_iter()
                .max_by_key(|(_, count)| *count)
                .map(|(language, _)| language.to_string());
        }

        let words: Vec<String> = text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut best: Option<(&str, usize)> = None;
        for (language, vocabulary) in KEYWORDS {
            let score = words
                .iter()
                .filter(|w| vocabulary.contains(&w.as_str()))
                .count();
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((*language, score));
            }
        }
        best.map(|(language, _)| language.to_string())
    }
}
