//! Audio conversion legality.
//!
//! BDInfo and MediaInfo audio tracks are paired by position. Lossless tracks
//! with at most two channels must become FLAC, multichannel LPCM must become
//! DTS-HD MA, commentaries must be AC-3 at 224 kbps, and every other track
//! keeps its BDInfo title.

use crate::diff::mismatch_detail;
use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::is_commentary;
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use regex::Regex;
use remuxcheck_paste::normalize::{collapse_whitespace, digits, is_number, FIELD_SEPARATOR};
use remuxcheck_paste::{remove_until_first_codec, AudioTrack, BdAudioTrack, TrackFields};
use std::sync::OnceLock;

const DTS_HD_MA: &str = "DTS-HD Master Audio";
const LPCM: &str = "LPCM Audio";
const FLAC: &str = "FLAC Audio";
const DOLBY_DIGITAL: &str = "Dolby Digital Audio";

/// Bitrate commentaries are encoded at.
pub const COMMENTARY_BIT_RATE: &str = "224";

static KBPS_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_BIT_RATE_RE: OnceLock<Regex> = OnceLock::new();

fn kbps_regex() -> &'static Regex {
    KBPS_RE.get_or_init(|| Regex::new(r"(\d+)\skbps").expect("invalid regex pattern"))
}

/// Last number followed by ` kbps` in a title.
fn title_bit_rate_regex() -> &'static Regex {
    TITLE_BIT_RATE_RE
        .get_or_init(|| Regex::new(r"(.*\s)\d+(\skbps.*)").expect("invalid regex pattern"))
}

/// Codec a BDInfo track must be converted to, if any.
///
/// `None` means the track is muxed as-is.
pub fn conversion_target(bdinfo_name: &str) -> Option<&'static str> {
    let fields: Vec<&str> = bdinfo_name.split(FIELD_SEPARATOR).map(str::trim).collect();
    let codec = fields.first().copied().unwrap_or_default();
    let stereo_or_less = fields
        .get(1)
        .filter(|channels| is_number(channels))
        .and_then(|channels| channels.parse::<f64>().ok())
        .is_some_and(|channels| channels < 3.0);

    match codec {
        DTS_HD_MA if stereo_or_less => Some(FLAC),
        LPCM if stereo_or_less => Some(FLAC),
        LPCM => Some(DTS_HD_MA),
        _ => None,
    }
}

/// Rule: audio/conversions
pub struct AudioConversionsRule;

impl AudioConversionsRule {
    fn check_commentary(
        &self,
        id: &str,
        bdinfo: &BdAudioTrack,
        mediainfo: &AudioTrack,
        entries: &mut Vec<ReportEntry>,
    ) {
        let Some((bdinfo_codec, _)) = bdinfo.name.split_once('/') else {
            entries.push(ReportEntry::warning(format!(
                "Audio {}: Cannot verify commentary audio conversion",
                id
            )));
            return;
        };
        let format = mediainfo.format.as_deref().map(str::trim);

        if bdinfo_codec.trim() == DOLBY_DIGITAL {
            entries.push(match format {
                Some("AC-3") => ReportEntry::correct(format!("Audio {}: Commentary already AC-3", id)),
                Some(other) => ReportEntry::error(format!(
                    "Audio {}: Commentary should be AC-3 instead of {}",
                    id, other
                )),
                None => ReportEntry::error(format!("Audio {}: Commentary does not have a format", id)),
            });
            return;
        }

        if format != Some("AC-3") {
            entries.push(ReportEntry::info(format!(
                "Audio {}: Commentary may be converted to AC-3",
                id
            )));
            return;
        }

        entries.push(match mediainfo.bit_rate.as_deref() {
            Some(bit_rate) if digits(bit_rate) == COMMENTARY_BIT_RATE => ReportEntry::correct(format!(
                "Audio {}: Commentary converted to `AC-3 @ 224 kbps`",
                id
            )),
            Some(bit_rate) => ReportEntry::error(format!(
                "Audio {}: Commentary AC-3 bitrate should be `224 kbps` instead of `{}`",
                id, bit_rate
            )),
            None => ReportEntry::error(format!(
                "Audio {}: Commentary AC-3 does not have a bitrate",
                id
            )),
        });
    }

    /// Checks codec, channels and bitrate of a converted track.
    fn check_conversion(
        &self,
        ctx: &CheckContext,
        id: &str,
        bdinfo_name: &str,
        mediainfo_title: Option<&str>,
        target: &str,
        entries: &mut Vec<ReportEntry>,
    ) {
        let could_not_verify = || ReportEntry::warning(format!("Could not verify audio {}", id));

        let Some(title) = mediainfo_title.filter(|t| t.contains(FIELD_SEPARATOR)) else {
            entries.push(could_not_verify());
            return;
        };
        let bdinfo_parts: Vec<&str> = bdinfo_name.split(FIELD_SEPARATOR).collect();
        let remainder = remove_until_first_codec(title, ctx.codecs()).remainder;
        let mediainfo_parts: Vec<&str> = remainder.split(FIELD_SEPARATOR).collect();
        if bdinfo_parts.len() <= 4 || mediainfo_parts.len() <= 4 {
            entries.push(could_not_verify());
            return;
        }

        if mediainfo_parts[0].trim() != target {
            entries.push(ReportEntry::error(format!(
                "Audio {} should be converted to {}",
                id, target
            )));
            return;
        }

        let (bd_channels, mi_channels) = (bdinfo_parts[1].trim(), mediainfo_parts[1].trim());
        let mono_downmix = ctx.eac3to.has_mono_flag() && mi_channels == "1.0";
        if bd_channels != mi_channels && !mono_downmix {
            entries.push(ReportEntry::error(format!(
                "Audio {}: Channels should be `{}` instead of `{}`",
                id, bd_channels, mi_channels
            )));
        }

        let bit_rates = (
            digits(mediainfo_parts[3]).parse::<u64>(),
            digits(bdinfo_parts[3]).parse::<u64>(),
        );
        if let (Ok(mi_bit_rate), Ok(bd_bit_rate)) = bit_rates {
            if mi_bit_rate > bd_bit_rate {
                entries.push(ReportEntry::error(format!(
                    "Audio {}: MediaInfo bitrate is greater than BDInfo bitrate: `{} kbps > {} kbps`",
                    id, mi_bit_rate, bd_bit_rate
                )));
            }
        }
    }

    /// Compares the (converted) BDInfo title with the MediaInfo title.
    fn check_track_name(
        &self,
        ctx: &CheckContext,
        id: &str,
        bdinfo_name: &str,
        target: Option<&str>,
        mediainfo_title: Option<&str>,
        entries: &mut Vec<ReportEntry>,
    ) {
        let Some(title) = mediainfo_title else {
            entries.push(ReportEntry::error(format!("Audio {}: Missing track name", id)));
            return;
        };

        let mut parts: Vec<&str> = bdinfo_name.split(FIELD_SEPARATOR).collect();
        if let (Some(target), Some(codec)) = (target, parts.first_mut()) {
            *codec = target;
        }
        let converted = parts.join(FIELD_SEPARATOR);
        if converted == title {
            entries.push(ReportEntry::correct(format!("Audio {}: Track names match", id)));
            return;
        }

        let remainder = remove_until_first_codec(title.trim(), ctx.codecs()).remainder;
        // Re-encodes shift the bitrate, so it is always taken from MediaInfo.
        let expected = match kbps_regex().captures(&remainder) {
            Some(caps) => title_bit_rate_regex()
                .replace(&converted, format!("${{1}}{}${{2}}", &caps[1]))
                .into_owned(),
            None => converted,
        };

        let mut accepted = vec![expected.clone()];
        if ctx.eac3to.has_mono_flag() {
            let mut fields: Vec<&str> = expected.split(FIELD_SEPARATOR).collect();
            if fields.len() > 1 {
                fields[1] = "1.0";
                accepted.push(fields.join(FIELD_SEPARATOR));
            }
        }

        if accepted.contains(&remainder) {
            entries.push(ReportEntry::correct(format!("Audio {}: Track names match", id)));
        } else {
            entries.push(
                ReportEntry::error(format!("Audio {}: Bad conversion", id))
                    .with_detail(mismatch_detail("MediaInfo", title, "BDInfo", &expected)),
            );
        }
    }
}

impl CheckRule for AudioConversionsRule {
    fn id(&self) -> &'static str {
        "audio/conversions"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "Audio tracks are converted according to their BDInfo codec"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking audio track conversions"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        if ctx.source.is_dvd() {
            return Ok(vec![ReportEntry::info(
                "No audio track conversions to check for DVDs",
            )]);
        }

        let mut entries = Vec::new();
        let pairs = ctx.bdinfo.audio.iter().zip(&ctx.mediainfo.audio);

        for (i, (bdinfo, mediainfo)) in pairs.enumerate() {
            let id = mediainfo.section_id(i);
            let bdinfo_name = collapse_whitespace(&bdinfo.name);
            let title = mediainfo.title.as_deref();

            if title.is_some_and(is_commentary) {
                self.check_commentary(&id, bdinfo, mediainfo, &mut entries);
                continue;
            }

            let target = conversion_target(&bdinfo_name);
            if let Some(target) = target {
                self.check_conversion(ctx, &id, &bdinfo_name, title, target, &mut entries);
            }
            self.check_track_name(ctx, &id, &bdinfo_name, target, title, &mut entries);
        }

        let bdinfo_len = ctx.bdinfo.audio.len();
        let mediainfo_len = ctx.mediainfo.audio.len();
        if bdinfo_len != mediainfo_len {
            let mut entry = ReportEntry::warning(format!(
                "Checked first `{}/{}` audio tracks",
                bdinfo_len.min(mediainfo_len),
                bdinfo_len.max(mediainfo_len)
            ));
            if bdinfo_len > mediainfo_len {
                entry = entry.with_detail(
                    "Did you forget to add a minus (-) sign in front of unused audio tracks in bdinfo?",
                );
            }
            entries.push(entry);
        }

        Ok(entries)
    }
}
