//! People and spelling checks on the descriptive part of audio titles.

use crate::report::{ReportEntry, RuleSection};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use remuxcheck_paste::normalize::{is_number, FIELD_SEPARATOR};
use remuxcheck_paste::{remove_until_first_codec, TrackFields};
use tracing::{debug, warn};

/// Text in front of the codec: `"Commentary by X / Dolby Digital Audio / ..."`
/// yields `"Commentary by X"`. Titles without a codec are used whole.
pub fn descriptive_segment(ctx: &CheckContext, title: &str) -> String {
    let split = remove_until_first_codec(title, ctx.codecs());
    if split.found_codec {
        split.stripped.join(FIELD_SEPARATOR)
    } else {
        title.to_string()
    }
}

/// Pushes `item` unless already present.
fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|i| i == item) {
        list.push(item.to_string());
    }
}

/// Rule: audio/people
/// Names in audio titles are known to a people database.
pub struct AudioPeopleRule;

impl CheckRule for AudioPeopleRule {
    fn id(&self) -> &'static str {
        "audio/people"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "People named in audio titles exist in TMDb/IMDb"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking IMDb/TMDb people"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();

        for (i, track) in ctx.mediainfo.audio.iter().enumerate() {
            let Some(title) = track.title.as_deref() else {
                continue;
            };
            let segment = descriptive_segment(ctx, title);
            if segment.trim().is_empty() {
                continue;
            }
            let names = ctx.services.names.extract(&segment);
            if names.is_empty() {
                continue;
            }

            let id = track.section_id(i);
            let mut matched = Vec::new();
            for service in &ctx.services.people {
                let mut failed = false;
                for name in &names {
                    match service.search(name) {
                        Ok(results) => {
                            if results.iter().any(|r| r == name) {
                                push_unique(&mut matched, name);
                            }
                        }
                        Err(err) => {
                            warn!(service = service.name(), error = %err, "people search failed");
                            failed = true;
                            break;
                        }
                    }
                }
                if failed {
                    entries.push(ReportEntry::info(format!(
                        "Audio {}: Failed to get {} people data",
                        id,
                        service.name()
                    )));
                }
            }

            let mut unmatched = Vec::new();
            for name in names.iter().filter(|n| !matched.contains(*n)) {
                push_unique(&mut unmatched, name);
            }

            if !matched.is_empty() {
                entries.push(ReportEntry::correct(format!(
                    "Audio {} People Matched: `{}`",
                    id,
                    matched.join(", ")
                )));
            }
            if !unmatched.is_empty() {
                entries.push(ReportEntry::warning(format!(
                    "Audio {} People Unmatched: `{}`",
                    id,
                    unmatched.join(", ")
                )));
            }
        }

        Ok(entries)
    }
}

/// Rule: audio/spelling
pub struct AudioSpellingRule;

impl CheckRule for AudioSpellingRule {
    fn id(&self) -> &'static str {
        "audio/spelling"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "Descriptive audio title text is spelled correctly"
    }

    fn failure_message(&self) -> &'static str {
        "Error spell checking audio track names"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let Some(checker) = ctx.services.spelling.as_deref() else {
            debug!("no spell checker configured");
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (i, track) in ctx.mediainfo.audio.iter().enumerate() {
            let Some(title) = track.title.as_deref() else {
                continue;
            };
            let segment: String = descriptive_segment(ctx, title)
                .chars()
                .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
                .collect();

            let name_tokens: Vec<String> = ctx
                .services
                .names
                .extract(&segment)
                .iter()
                .flat_map(|name| name.split_whitespace().map(str::to_string).collect::<Vec<_>>())
                .collect();

            let mut misspelled = Vec::new();
            for token in segment.split_whitespace() {
                if name_tokens.iter().any(|n| n == token)
                    || ctx.config.ignores_spelling(token)
                    || is_number(token)
                {
                    continue;
                }
                if !checker.check(token) {
                    push_unique(&mut misspelled, token);
                }
            }

            if !misspelled.is_empty() {
                entries.push(ReportEntry::error(format!(
                    "Audio {} Misspelled: `{}`",
                    track.section_id(i),
                    misspelled.join(", ")
                )));
            }
        }

        Ok(entries)
    }
}
