//! Per-track container flags: language, muxing mode, default flag.

use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::capitalize;
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use remuxcheck_paste::TrackFields;

/// Rule: metadata/tracks-have-language
/// Every video, audio and text track declares a language.
pub struct TracksHaveLanguageRule;

impl CheckRule for TracksHaveLanguageRule {
    fn id(&self) -> &'static str {
        "metadata/tracks-have-language"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "All tracks have a language"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking that tracks have a language"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();

        for (section, index, track) in ctx.mediainfo.tracks() {
            if section == "general" || track.language().is_some() {
                continue;
            }
            entries.push(ReportEntry::error(format!(
                "{} {}: Does not have a language chosen",
                capitalize(section),
                track.section_id(index)
            )));
        }

        if entries.is_empty() {
            entries.push(ReportEntry::correct("All tracks have a language chosen"));
        }
        Ok(entries)
    }
}

/// Rule: metadata/video-language
/// The video track's language equals the first audio track's.
pub struct VideoLanguageRule;

impl CheckRule for VideoLanguageRule {
    fn id(&self) -> &'static str {
        "metadata/video-language"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "Video language matches first audio language"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking video language matches first audio language"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let Some(video) = ctx.mediainfo.video.first().and_then(|v| v.language.as_deref()) else {
            return Ok(vec![ReportEntry::error("Video language not set")]);
        };
        let Some(audio) = ctx.mediainfo.audio.first().and_then(|a| a.language.as_deref()) else {
            return Ok(vec![ReportEntry::error("First audio language not set")]);
        };

        let entry = if video == audio {
            ReportEntry::correct(format!(
                "Video language matches first audio language: `{}`",
                video
            ))
        } else {
            ReportEntry::error(format!(
                "Video language does not match first audio language: `{}` vs `{}`",
                video, audio
            ))
        };
        Ok(vec![entry])
    }
}

/// Rule: metadata/muxing-mode
/// No section carries a muxing mode (e.g. header stripping).
pub struct MuxingModeRule;

impl CheckRule for MuxingModeRule {
    fn id(&self) -> &'static str {
        "metadata/muxing-mode"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "No track has a muxing mode"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking muxing mode"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();

        for (section, index, track) in ctx.mediainfo.tracks() {
            if let Some(mode) = track.muxing_mode() {
                entries.push(ReportEntry::error(format!(
                    "{} {} has muxing mode: `{}`",
                    capitalize(section),
                    track.section_id(index),
                    mode
                )));
            }
        }

        if entries.is_empty() {
            entries.push(ReportEntry::correct("All tracks do not have a muxing mode"));
        }
        Ok(entries)
    }
}

/// Rule: metadata/default-flag
/// At most one audio and one text track are flagged `default=yes`.
pub struct DefaultFlagRule;

fn default_count<T: TrackFields>(tracks: &[T]) -> usize {
    tracks.iter().filter(|t| t.is_default()).count()
}

impl CheckRule for DefaultFlagRule {
    fn id(&self) -> &'static str {
        "metadata/default-flag"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "At most one default audio and one default text track"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking default flag"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();

        let counts = [
            ("audio", default_count(&ctx.mediainfo.audio)),
            ("text", default_count(&ctx.mediainfo.text)),
        ];
        for (section, count) in counts {
            if count > 1 {
                entries.push(ReportEntry::error(format!(
                    "Only 1 {} track should be `default=yes`, found {}",
                    section, count
                )));
            }
        }

        if entries.is_empty() {
            entries.push(ReportEntry::correct(
                "At most 1 audio and 1 text track are `default=yes`",
            ));
        }
        Ok(entries)
    }
}
