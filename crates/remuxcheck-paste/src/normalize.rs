//! Track-name normalization.
//!
//! Pure string transforms that canonicalize a single BDInfo or MediaInfo
//! track name into a comparable form. None of them fail.

use crate::codecs::CodecTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Separator between fields of a composite track name.
pub const FIELD_SEPARATOR: &str = " / ";

static DTS_CORE_RE: OnceLock<Regex> = OnceLock::new();

fn dts_core_regex() -> &'static Regex {
    DTS_CORE_RE.get_or_init(|| {
        Regex::new(r"(?i)\s*\(DTS Core:[^)]*\)").expect("invalid regex pattern")
    })
}

/// Collapses runs of whitespace into single spaces and trims both ends.
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes the "/ Left Eye" and "/ Right Eye" markers of 3D video tracks.
pub fn strip_3d_eye(name: &str) -> String {
    name.replace(" / Left Eye", "").replace(" / Right Eye", "")
}

/// Removes a trailing dialog normalization field (e.g. `" / DN -4dB"`).
///
/// Only the last field is inspected, and only when the name has at least one
/// field separator.
pub fn strip_dialog_normalization(name: &str) -> String {
    match name.rsplit_once(FIELD_SEPARATOR) {
        Some((head, last)) if last.trim_start().to_uppercase().starts_with("DN") => {
            head.to_string()
        }
        _ => name.to_string(),
    }
}

/// Removes a `(DTS Core: ...)` annotation.
pub fn strip_dts_core(name: &str) -> String {
    dts_core_regex().replace_all(name, "").into_owned()
}

/// Normalizes an audio or subtitle track name.
pub fn format_track_name(name: &str) -> String {
    let name = strip_3d_eye(name);
    let name = collapse_whitespace(&name);
    let name = strip_dialog_normalization(&name);
    let name = strip_dts_core(&name);
    collapse_whitespace(&name)
}

/// Normalizes a video track name.
///
/// Applies [`format_track_name`] and then forces a decimal point in the
/// frame-rate field (the fourth field), which some locales print with a comma.
pub fn format_video_track_name(name: &str) -> String {
    let name = format_track_name(name);
    let mut fields: Vec<String> = name.split('/').map(str::to_string).collect();
    if let Some(fps) = fields.get_mut(3) {
        *fps = fps.replace(',', ".");
    }
    fields.join("/")
}

/// Splits a quick-summary audio string into its language and codec details.
///
/// `"English / DTS-HD Master Audio / 5.1 / ..."` becomes
/// `(Some("English"), "DTS-HD Master Audio / 5.1 / ...")`. A string that
/// already starts with a codec is returned unchanged with no language.
pub fn split_language<'a>(composite: &'a str, codecs: &CodecTable) -> (Option<&'a str>, &'a str) {
    match composite.split_once(FIELD_SEPARATOR) {
        Some((first, rest)) if !codecs.is_audio_codec(first) && !first.trim().is_empty() => {
            (Some(first.trim()), rest)
        }
        _ => (None, composite),
    }
}

/// Result of [`remove_until_first_codec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSplit {
    /// The codec field onward, or the whole title when no codec was found.
    pub remainder: String,
    /// Fields preceding the codec, in order.
    pub stripped: Vec<String>,
    /// Whether any field matched an audio codec.
    pub found_codec: bool,
}

/// Peels descriptive fields off the front of an audio title.
///
/// Scans the `" / "` separated fields left to right; the first field that is
/// an audio codec display name starts the remainder. Applying this to its
/// own remainder returns the remainder unchanged with nothing stripped.
pub fn remove_until_first_codec(title: &str, codecs: &CodecTable) -> CodecSplit {
    let fields: Vec<&str> = title.split(FIELD_SEPARATOR).collect();

    match fields.iter().position(|field| codecs.is_audio_codec(field)) {
        Some(index) => CodecSplit {
            remainder: fields[index..].join(FIELD_SEPARATOR),
            stripped: fields[..index].iter().map(|s| s.to_string()).collect(),
            found_codec: true,
        },
        None => CodecSplit {
            remainder: title.to_string(),
            stripped: Vec::new(),
            found_codec: false,
        },
    }
}

/// Concatenates all ASCII digits of `value` (e.g. `"1 509 kb/s"` -> `"1509"`).
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Parses the first decimal number found in `value`.
pub fn leading_number(value: &str) -> Option<f64> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let tail = &value[start..];
    let end = tail
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(tail.len());
    tail[..end].trim_end_matches('.').parse().ok()
}

/// Returns true if `value` parses as a float.
pub fn is_number(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_track_name_strips_dn_and_core() {
        let name = "DTS-HD Master Audio  /  5.1 / 48 kHz / 2040 kbps / 24-bit (DTS Core: 5.1 / 48 kHz / 1509 kbps / 24-bit)";
        assert_eq!(
            format_track_name(name),
            "DTS-HD Master Audio / 5.1 / 48 kHz / 2040 kbps / 24-bit"
        );

        let compat = "Compatibility Track / Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps / DN -4dB";
        assert_eq!(
            format_track_name(compat),
            "Compatibility Track / Dolby Digital Audio / 5.1 / 48 kHz / 640 kbps"
        );
    }

    #[test]
    fn test_dn_only_stripped_from_last_field() {
        assert_eq!(strip_dialog_normalization("DN"), "DN");
        assert_eq!(
            strip_dialog_normalization("Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps"),
            "Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps"
        );
    }

    #[test]
    fn test_format_video_track_name() {
        let name = "MPEG-4 AVC Video / 29998 kbps / 1080p / 23,976 fps / 16:9 / High Profile 4.1 / Left Eye";
        assert_eq!(
            format_video_track_name(name),
            "MPEG-4 AVC Video / 29998 kbps / 1080p / 23.976 fps / 16:9 / High Profile 4.1"
        );
    }

    #[test]
    fn test_split_language() {
        let codecs = CodecTable::default();
        assert_eq!(
            split_language("English / Dolby Digital Audio / 2.0", &codecs),
            (Some("English"), "Dolby Digital Audio / 2.0")
        );
        assert_eq!(
            split_language("Dolby Digital Audio / 2.0", &codecs),
            (None, "Dolby Digital Audio / 2.0")
        );
    }

    #[test]
    fn test_remove_until_first_codec() {
        let codecs = CodecTable::default();
        let split = remove_until_first_codec(
            "Commentary by John Doe / Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps",
            &codecs,
        );
        assert_eq!(split.remainder, "Dolby Digital Audio / 2.0 / 48 kHz / 224 kbps");
        assert_eq!(split.stripped, vec!["Commentary by John Doe".to_string()]);
        assert!(split.found_codec);

        let again = remove_until_first_codec(&split.remainder, &codecs);
        assert_eq!(again.remainder, split.remainder);
        assert!(again.stripped.is_empty());
        assert!(again.found_codec);
    }

    #[test]
    fn test_remove_until_first_codec_without_codec() {
        let codecs = CodecTable::default();
        let split = remove_until_first_codec("Isolated Score", &codecs);
        assert_eq!(split.remainder, "Isolated Score");
        assert!(split.stripped.is_empty());
        assert!(!split.found_codec);
    }

    #[test]
    fn test_number_helpers() {
        assert_eq!(digits("1 509 kb/s"), "1509");
        assert_eq!(leading_number("23.976 (24000/1001) FPS"), Some(23.976));
        assert_eq!(leading_number("none"), None);
        assert!(is_number("2.0"));
        assert!(!is_number("Atmos"));
    }
}
