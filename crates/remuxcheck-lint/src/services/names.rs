//! Heuristic person-name extraction.

use super::NameExtractor;

/// Words that are capitalized in track titles but never part of a name.
const TITLE_WORDS: &[&str] = &[
    "Actor", "Actors", "And", "Audio", "Author", "Cast", "Commentary", "Composer", "Crew",
    "Director", "Directors", "Editor", "Effects", "Film", "Historian", "Isolated", "Music",
    "Producer", "Producers", "Score", "Screenwriter", "Stereo", "The", "Track", "Visual", "With",
    "Writer", "Writers",
];

/// Extracts runs of capitalized words as person names.
///
/// A name is two to `max_tokens` consecutive capitalized words, excluding
/// common title vocabulary. `"Commentary by Director Michael Mann"` yields
/// `["Michael Mann"]`.
#[derive(Debug, Clone)]
pub struct CapitalizedNameExtractor {
    max_tokens: usize,
}

impl Default for CapitalizedNameExtractor {
    fn default() -> Self {
        Self { max_tokens: 4 }
    }
}

fn is_name_token(token: &str) -> bool {
    let mut chars = token.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    starts_upper
        && token
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '-' | '.'))
        && !TITLE_WORDS.contains(&token)
}

impl NameExtractor for CapitalizedNameExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        let mut close = |run: &mut Vec<&str>| {
            if run.len() >= 2 && run.len() <= self.max_tokens {
                let name = run.join(" ");
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            run.clear();
        };

        for raw in text.split_whitespace() {
            let token = raw.trim_end_matches([',', ';', ':', '/', ')']).trim_start_matches('(');
            if is_name_token(token) {
                run.push(token);
                if token.len() != raw.len() {
                    close(&mut run);
                }
            } else {
                close(&mut run);
            }
        }
        close(&mut run);

        names
    }
}
