//! Row reformatting for BDInfo track lines.
//!
//! Each BDInfo layout prints the same stream differently. These functions
//! bring every row to the quick-summary composite form
//! (`"<codec> / <field> / <field> ..."`), or return `None` for a malformed row.

use crate::bdinfo::BdAudioTrack;
use crate::codecs::CodecTable;
use crate::normalize::{format_track_name, format_video_track_name, split_language, FIELD_SEPARATOR};

const AC3_EMBEDDED: &str = "(ac3 embedded:";
const COMPATIBILITY_PREFIX: &str = "Compatibility Track / Dolby Digital Audio / ";

/// Returns the value after the first `:` of a `"Label: value"` line.
pub(crate) fn label_value(line: &str) -> &str {
    line.split_once(':').map(|(_, value)| value).unwrap_or_default()
}

/// Splits off an `(AC3 Embedded: ...)` parenthetical, case-insensitively.
///
/// Returns the primary part and the embedded fragment without its closing
/// parenthesis.
fn split_ac3_embedded(value: &str) -> Option<(&str, &str)> {
    // ASCII lowercasing keeps byte offsets aligned with the original.
    let index = value.to_ascii_lowercase().find(AC3_EMBEDDED)?;
    let primary = &value[..index];
    let fragment = value[index + AC3_EMBEDDED.len()..].trim();
    let fragment = fragment.strip_suffix(')').unwrap_or(fragment);
    Some((primary, fragment))
}

fn compatibility_track(fragment: &str, language: Option<String>) -> BdAudioTrack {
    BdAudioTrack::new(
        format_track_name(&format!("{}{}", COMPATIBILITY_PREFIX, fragment.trim())),
        language,
    )
}

/// Quick summary `Video:` value.
pub(crate) fn quick_summary_video(value: &str) -> Option<String> {
    let name = format_video_track_name(value);
    (!name.is_empty()).then_some(name)
}

/// Quick summary `Audio:` value, e.g.
/// `English / Dolby TrueHD/Atmos Audio / 7.1 / ... (AC3 Embedded: 5.1 / ...)`.
pub(crate) fn quick_summary_audio(value: &str, codecs: &CodecTable) -> Vec<BdAudioTrack> {
    let (primary, embedded) = match split_ac3_embedded(value) {
        Some((primary, fragment)) => (primary, Some(fragment)),
        None => (value.split('(').next().unwrap_or_default(), None),
    };

    let primary = format_track_name(primary);
    if primary.is_empty() {
        return Vec::new();
    }
    let (language, name) = split_language(&primary, codecs);
    let language = language.map(str::to_string);

    let mut tracks = vec![BdAudioTrack::new(name, language.clone())];
    if let Some(fragment) = embedded {
        tracks.push(compatibility_track(fragment, language));
    }
    tracks
}

/// Quick summary `Subtitle:` value.
pub(crate) fn quick_summary_subtitle(value: &str) -> Option<String> {
    let name = format_track_name(value);
    (!name.is_empty()).then_some(name)
}

/// Playlist report video row, e.g.
/// `MPEG-4 AVC Video   29998 kbps   1080p / 23.976 fps / 16:9 / High Profile 4.1`.
pub(crate) fn playlist_video(row: &str) -> Option<String> {
    let tokens: Vec<&str> = row.split_whitespace().collect();
    let kbps = tokens.iter().position(|t| *t == "kbps")?;
    if kbps < 2 {
        return None;
    }

    let before = tokens[..kbps - 1].join(" ");
    let after = tokens[kbps + 1..].join(" ");
    let mut name = format!("{}{}{} kbps", before, FIELD_SEPARATOR, tokens[kbps - 1]);
    if !after.is_empty() {
        name.push_str(FIELD_SEPARATOR);
        name.push_str(&after);
    }
    Some(format_video_track_name(&name))
}

/// Playlist report audio row, e.g.
/// `DTS-HD Master Audio   English   2040 kbps   5.1 / 48 kHz / 2040 kbps / 24-bit (DTS Core: ...)`.
///
/// The first slash group holds `<codec words> <language> <bitrate> kbps <channels>`.
pub(crate) fn playlist_audio(row: &str) -> Vec<BdAudioTrack> {
    let embedded = split_ac3_embedded(row).map(|(_, fragment)| fragment);
    let body = row.split('(').next().unwrap_or_default().trim();

    let (first_group, rest) = match body.split_once(FIELD_SEPARATOR) {
        Some((first, rest)) => (first, rest.trim()),
        None => (body, ""),
    };
    let tokens: Vec<&str> = first_group.split_whitespace().collect();
    if tokens.len() < 5 {
        return Vec::new();
    }

    let codec = tokens[..tokens.len() - 4].join(" ");
    let language = tokens[tokens.len() - 4].to_string();
    let channels = tokens[tokens.len() - 1];

    let mut name = format!("{}{}{}", codec, FIELD_SEPARATOR, channels);
    if !rest.is_empty() {
        name.push_str(FIELD_SEPARATOR);
        name.push_str(rest);
    }

    let mut tracks = vec![BdAudioTrack::new(format_track_name(&name), Some(language.clone()))];
    if let Some(fragment) = embedded {
        tracks.push(compatibility_track(fragment, Some(language)));
    }
    tracks
}

/// Playlist report subtitle row, e.g.
/// `Presentation Graphics   English   33.148 kbps   1920x1080 / 512 Captions`.
///
/// Captured as `"<language> / <n> kbps[ / description]"`.
pub(crate) fn playlist_subtitle(row: &str) -> Option<String> {
    let tokens: Vec<&str> = row.split_whitespace().collect();
    let kbps = tokens.iter().position(|t| *t == "kbps")?;
    if kbps < 2 {
        return None;
    }

    let mut name = format!("{}{}{} kbps", tokens[kbps - 2], FIELD_SEPARATOR, tokens[kbps - 1]);
    let description = tokens[kbps + 1..].join(" ");
    if !description.is_empty() {
        name.push_str(FIELD_SEPARATOR);
        name.push_str(&description);
    }
    Some(format_track_name(&name))
}
