//! Chapter rules.

use crate::report::{ReportEntry, RuleSection};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use crate::services::Language;
use regex::Regex;
use remuxcheck_paste::normalize::digits;
use remuxcheck_paste::Chapter;
use std::sync::OnceLock;
use tracing::debug;

/// Returns all chapter rules, in report order.
pub fn all_rules() -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(ChapterListingRule),
        Box::new(ChaptersRequiredRule),
        Box::new(ChapterLanguageRule),
        Box::new(ChapterPaddingRule),
    ]
}

static NUMBERED_CHAPTER_RE: OnceLock<Regex> = OnceLock::new();

fn numbered_chapter_regex() -> &'static Regex {
    NUMBERED_CHAPTER_RE
        .get_or_init(|| Regex::new(r"(?i)^chapter\s\d+").expect("invalid regex pattern"))
}

/// The single chapter menu, if there is exactly one and it is not empty.
fn single_menu<'a>(ctx: &CheckContext<'a>) -> Option<&'a [Chapter]> {
    match ctx.mediainfo.menu.as_slice() {
        [chapters] if !chapters.is_empty() => Some(chapters.as_slice()),
        _ => None,
    }
}

/// Rule: chapters/listing
pub struct ChapterListingRule;

impl CheckRule for ChapterListingRule {
    fn id(&self) -> &'static str {
        "chapters/listing"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Chapters
    }

    fn description(&self) -> &'static str {
        "Lists the chapters and their languages"
    }

    fn failure_message(&self) -> &'static str {
        "Error printing chapters"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let Some(chapters) = ctx.mediainfo.menu.first().filter(|m| !m.is_empty()) else {
            return Ok(vec![ReportEntry::info("No chapters")]);
        };

        let listing = chapters
            .iter()
            .map(|chapter| {
                let mut line = format!("{} :", chapter.time);
                for title in &chapter.titles {
                    if let Some(language) = title.language.as_deref() {
                        line.push_str(&format!(" lang: {}", language));
                    }
                    if !title.title.is_empty() {
                        line.push_str(&format!(" title: {}", title.title));
                    }
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut entries = vec![ReportEntry::info("Chapters").with_detail(listing).unrecorded()];

        let languages: Vec<&str> = chapters[0].languages.iter().flatten().map(String::as_str).collect();
        if !languages.is_empty() {
            entries.push(
                ReportEntry::info(format!("Chapter languages: `{}`", languages.join(", "))).unrecorded(),
            );
        }
        Ok(entries)
    }
}

/// Rule: chapters/required
/// An eac3to log that extracted chapters means the remux needs them.
pub struct ChaptersRequiredRule;

impl CheckRule for ChaptersRequiredRule {
    fn id(&self) -> &'static str {
        "chapters/required"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Chapters
    }

    fn description(&self) -> &'static str {
        "Has chapters when the eac3to log extracted them"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking if should have chapters"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        if !ctx.eac3to.mentions_chapters() {
            return Ok(Vec::new());
        }

        let entry = if ctx.mediainfo.menu.is_empty() {
            ReportEntry::error("Should have chapters (from eac3to log)")
        } else {
            ReportEntry::correct("Has chapters (from eac3to log)")
        };
        Ok(vec![entry])
    }
}

/// Chapter titles of one language tag, joined for detection.
struct Phrase<'a> {
    /// `None` for titles without a language prefix.
    language: Option<&'a str>,
    text: String,
}

/// Rule: chapters/language
///
/// Chapter language tags must be valid ISO-639 codes, and the detected
/// language of each tag's titles must be one of the tagged languages.
pub struct ChapterLanguageRule;

impl ChapterLanguageRule {
    fn phrases(chapters: &[Chapter]) -> Vec<Phrase<'_>> {
        let mut phrases: Vec<Phrase> = Vec::new();
        for title in chapters.iter().flat_map(|c| &c.titles) {
            let language = title.language.as_deref();
            let index = match phrases.iter().position(|p| p.language == language) {
                Some(index) => index,
                None => {
                    phrases.push(Phrase {
                        language,
                        text: String::new(),
                    });
                    phrases.len() - 1
                }
            };
            phrases[index].text.push_str(&title.title);
            phrases[index].text.push('\n');
        }
        phrases
    }

    fn detect(&self, ctx: &CheckContext, tagged: &[Language], text: &str) -> ReportEntry {
        let detected = ctx
            .services
            .language_detector
            .detect(text)
            .and_then(|code| match ctx.services.languages.lookup(&code) {
                Ok(language) => Some(language),
                Err(err) => {
                    debug!(error = %err, "detected chapter language is not in the table");
                    None
                }
            });
        let Some(detected) = detected else {
            return ReportEntry::warning("Could not detect chapters language");
        };

        if tagged.contains(&detected) {
            return ReportEntry::correct(format!(
                "Chapters language matches detected language: `{}`",
                detected.name
            ));
        }

        let mut names: Vec<&str> = tagged.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.is_empty() {
            ReportEntry::error(format!(
                "No chapter languages. Detected chapter language: `{}`",
                detected.name
            ))
        } else {
            ReportEntry::error(format!(
                "Chapters languages: `{}` do not match detected language: `{}`",
                names.join(", "),
                detected.name
            ))
        }
    }
}

impl CheckRule for ChapterLanguageRule {
    fn id(&self) -> &'static str {
        "chapters/language"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Chapters
    }

    fn description(&self) -> &'static str {
        "Chapter languages are valid and match the titles"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking chapter language"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        if ctx.mediainfo.menu.is_empty() {
            return Ok(Vec::new());
        }
        let Some(chapters) = single_menu(ctx) else {
            return Ok(vec![ReportEntry::error("Must have at most 1 chapter menu")]);
        };

        let mut entries = Vec::new();
        // (tag, languages the tag resolved to)
        let mut resolved: Vec<(&str, Vec<Language>)> = Vec::new();
        let mut invalid = Vec::new();

        for (number, chapter) in (1..).zip(chapters) {
            let mut valid = !chapter.languages.is_empty();
            for code in &chapter.languages {
                let Some(code) = code.as_deref() else {
                    valid = false;
                    continue;
                };
                match ctx.services.languages.lookup(code) {
                    Ok(language) => match resolved.iter_mut().find(|(tag, _)| *tag == code) {
                        Some((_, languages)) => {
                            if !languages.contains(&language) {
                                languages.push(language);
                            }
                        }
                        None => resolved.push((code, vec![language])),
                    },
                    Err(_) => valid = false,
                }
            }
            if !valid {
                invalid.push(number.to_string());
            }
        }

        if invalid.is_empty() {
            entries.push(ReportEntry::correct("All chapters have a language set"));
        } else if invalid.len() == chapters.len() {
            entries.push(ReportEntry::error("All chapters do not have a language set"));
        } else {
            entries.push(ReportEntry::error(format!(
                "The following chapters do not have a language set: `{}`",
                invalid.join(", ")
            )));
        }

        for phrase in Self::phrases(chapters) {
            let Some(tag) = phrase.language else {
                entries.push(ReportEntry::error("No chapter language set"));
                continue;
            };
            if phrase.text.trim().is_empty() {
                continue;
            }
            let tagged = resolved
                .iter()
                .find(|(code, _)| *code == tag)
                .map(|(_, languages)| languages.as_slice())
                .unwrap_or_default();
            entries.push(self.detect(ctx, tagged, &phrase.text));
        }

        Ok(entries)
    }
}

/// Rule: chapters/padding
/// `Chapter 01` style titles are zero padded to the width of the chapter count.
pub struct ChapterPaddingRule;

impl CheckRule for ChapterPaddingRule {
    fn id(&self) -> &'static str {
        "chapters/padding"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Chapters
    }

    fn description(&self) -> &'static str {
        "Numbered chapter titles are zero padded"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking chapter padding"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        // Only a single menu is inspected; anything else has nothing to fault.
        let padded = match ctx.mediainfo.menu.as_slice() {
            [chapters] => {
                let width = chapters.len().to_string().len();
                chapters
                    .iter()
                    .flat_map(|c| &c.titles)
                    .filter(|t| numbered_chapter_regex().is_match(&t.title))
                    .all(|t| digits(&t.title).len() >= width)
            }
            _ => true,
        };

        let entry = if padded {
            ReportEntry::correct("Chapters properly padded")
        } else {
            ReportEntry::error("Incorrect chapter padding")
        };
        Ok(vec![entry])
    }
}
