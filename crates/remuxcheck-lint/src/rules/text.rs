//! Text (subtitle) rules.

use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::is_commentary;
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use remuxcheck_paste::{TextTrack, TrackFields};

/// Returns all text rules, in report order.
pub fn all_rules() -> Vec<Box<dyn CheckRule>> {
    vec![
        Box::new(TextListingRule),
        Box::new(TextOrderRule),
        Box::new(ForeignDefaultRule),
    ]
}

fn listing_line(index: usize, track: &TextTrack) -> String {
    let mut line = format!("{}:", track.section_id(index));
    if let Some(default) = track.default.as_deref() {
        line.push_str(&format!(" default:{}", default));
    }
    if let Some(forced) = track.forced.as_deref() {
        line.push_str(&format!(" forced:{}", forced));
    }
    if let Some(language) = track.language.as_deref() {
        line.push_str(&format!(" language:{}", language));
    }
    if let Some(title) = track.title.as_deref() {
        line.push_str(&format!(" title: {}", title));
    }
    line
}

/// Rule: text/track-listing
pub struct TextListingRule;

impl CheckRule for TextListingRule {
    fn id(&self) -> &'static str {
        "text/track-listing"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Text
    }

    fn description(&self) -> &'static str {
        "Lists the text tracks with their flags"
    }

    fn failure_message(&self) -> &'static str {
        "Error printing text tracks"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        if ctx.mediainfo.text.is_empty() {
            return Ok(vec![ReportEntry::info("No text tracks")]);
        }

        let listing = ctx
            .mediainfo
            .text
            .iter()
            .enumerate()
            .map(|(i, track)| listing_line(i, track))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(vec![ReportEntry::info("Text Tracks")
            .with_detail(listing)
            .unrecorded()])
    }
}

/// Rule: text/order
///
/// Expected layout:
///
/// 1. an optional forced English track, first
/// 2. the main subtitles, English first, then languages in alphabetical order
///    (titles alphabetical within one language)
/// 3. commentary subtitles, last and contiguous
pub struct TextOrderRule;

impl CheckRule for TextOrderRule {
    fn id(&self) -> &'static str {
        "text/order"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Text
    }

    fn description(&self) -> &'static str {
        "Subtitles are ordered forced, main by language, then commentary"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking text track order"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let tracks = &ctx.mediainfo.text;
        let mut entries = Vec::new();
        if tracks.is_empty() {
            return Ok(entries);
        }

        // Stays at 1 while still inside the leading English group.
        let mut language_number = 1;
        let mut first_main_seen = false;
        let mut commentary_seen = false;
        let mut prev_language = String::new();
        let mut prev_title = String::new();
        let mut in_order = true;

        for (i, track) in tracks.iter().enumerate() {
            let id = track.section_id(i);
            let prev_id = || {
                i.checked_sub(1)
                    .map(|p| tracks[p].section_id(p))
                    .unwrap_or_default()
            };

            let mut language = match track.language.as_deref() {
                Some(language) => language.to_lowercase(),
                None => {
                    // reported by metadata/tracks-have-language
                    in_order = false;
                    String::new()
                }
            };
            let forced = track.is_forced();
            let mut title = track.title.clone().unwrap_or_default();
            let commentary = track.title.as_deref().is_some_and(is_commentary);

            if i == 0 && forced {
                // a leading forced track of any language is accepted
            } else if forced && language == "english" {
                in_order = false;
                entries.push(ReportEntry::error(format!(
                    "Text {} is a forced English track, it must be first",
                    id
                )));
            } else if !first_main_seen {
                first_main_seen = true;
                language.clear();
                title.clear();
            } else if commentary {
                commentary_seen = true;
            } else if commentary_seen {
                in_order = false;
                entries.push(ReportEntry::error(format!(
                    "Text {} came after the commentary sub(s)",
                    id
                )));
            } else if language == prev_language {
                if !prev_title.is_empty() && title < prev_title {
                    entries.push(ReportEntry::warning(format!(
                        "Text {} might need to come after Text {}, alphabetical within language",
                        prev_id(),
                        id
                    )));
                }
            } else if language_number > 1 && language < prev_language {
                in_order = false;
                entries.push(ReportEntry::error(format!(
                    "Text {} should come after Text {}, language order",
                    prev_id(),
                    id
                )));
            } else if language_number == 1 && language != "english" {
                language_number += 1;
            }

            prev_language = language;
            prev_title = title;
        }

        if in_order {
            entries.push(ReportEntry::correct("Subtitles are in order"));
        }
        Ok(entries)
    }
}

/// Rule: text/foreign-default
/// Foreign-language films flag one English subtitle `default=yes`.
pub struct ForeignDefaultRule;

impl CheckRule for ForeignDefaultRule {
    fn id(&self) -> &'static str {
        "text/foreign-default"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Text
    }

    fn description(&self) -> &'static str {
        "Foreign films have an English subtitle flagged default"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking text track default flag"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let is_english = |language: Option<&str>| {
            language.is_some_and(|l| l.trim().eq_ignore_ascii_case("english"))
        };

        let first_audio = ctx.mediainfo.audio.first().and_then(|a| a.language.as_deref());
        if ctx.mediainfo.text.is_empty() || is_english(first_audio) {
            return Ok(Vec::new());
        }

        let mut english = ctx
            .mediainfo
            .text
            .iter()
            .filter(|t| is_english(t.language.as_deref()))
            .peekable();
        if english.peek().is_none() {
            return Ok(Vec::new());
        }

        let entry = if english.any(|t| t.is_default()) {
            ReportEntry::correct("Foreign film, one of the English subtitles are `default=yes`")
        } else {
            ReportEntry::error("Foreign film, one of the English subtitles should be `default=yes`")
        };
        Ok(vec![entry])
    }
}
