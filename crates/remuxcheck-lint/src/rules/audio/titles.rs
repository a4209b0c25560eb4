//! Audio title listing and the FLAC title cross-check.

use crate::diff::mismatch_detail;
use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::{format_number, number};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use remuxcheck_paste::normalize::digits;
use remuxcheck_paste::{remove_until_first_codec, AudioTrack, TrackFields};

/// Rule: audio/track-names
pub struct AudioTrackNamesRule;

impl CheckRule for AudioTrackNamesRule {
    fn id(&self) -> &'static str {
        "audio/track-names"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "Lists the MediaInfo audio track titles"
    }

    fn failure_message(&self) -> &'static str {
        "Error printing audio track names"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        if ctx.mediainfo.audio.is_empty() {
            return Ok(vec![ReportEntry::error("No audio tracks")]);
        }

        let listing = ctx
            .mediainfo
            .audio
            .iter()
            .enumerate()
            .map(|(i, track)| {
                format!("{}: {}", track.section_id(i), track.title.as_deref().unwrap_or_default())
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(vec![ReportEntry::info("Audio Track Names")
            .with_detail(listing)
            .unrecorded()])
    }
}

/// Rebuilds a FLAC title from MediaInfo's own fields:
/// `FLAC Audio / 2.0 / 48 kHz / 1509 kbps / 24-bit`.
pub fn expected_flac_title(track: &AudioTrack) -> Option<String> {
    let channels = number(track.channels.as_deref()?)?;
    let sampling_rate = number(track.sampling_rate.as_deref()?)?;
    let bit_rate = digits(track.bit_rate.as_deref()?);
    let bit_depth = track.bit_depth.as_deref()?.trim().to_lowercase().replace(" bits", "-bit");
    if bit_rate.is_empty() {
        return None;
    }

    Some(format!(
        "FLAC Audio / {} / {} kHz / {} kbps / {}",
        format!("{:.1}", channels),
        format_number(sampling_rate),
        bit_rate,
        bit_depth
    ))
}

/// Rule: audio/flac-titles
/// FLAC titles agree with MediaInfo's own channel, rate and depth fields.
pub struct FlacTitlesRule;

impl CheckRule for FlacTitlesRule {
    fn id(&self) -> &'static str {
        "audio/flac-titles"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "FLAC track titles match their MediaInfo fields"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking FLAC audio tracks"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();

        for (i, track) in ctx.mediainfo.audio.iter().enumerate() {
            let Some(title) = track.title.as_deref() else {
                continue;
            };
            let split = remove_until_first_codec(title, ctx.codecs());
            if !split.found_codec || track.format.as_deref().map(str::trim) != Some("FLAC") {
                continue;
            }

            let id = track.section_id(i);
            let Some(expected) = expected_flac_title(track) else {
                entries.push(ReportEntry::warning(format!(
                    "Audio {}: Could not verify FLAC track name",
                    id
                )));
                continue;
            };

            if expected == split.remainder {
                entries.push(ReportEntry::correct(format!("Audio {}: Good track name", id)));
            } else {
                entries.push(
                    ReportEntry::error(format!("Audio {}: Bad track name", id)).with_detail(
                        mismatch_detail("Actual", &split.remainder, "Expected", &expected),
                    ),
                );
            }
        }

        Ok(entries)
    }
}
