//! Codec lookup tables.
//!
//! Maps the codec display names used by BDInfo and MediaInfo track titles to
//! the short tokens used in release filenames, to elementary stream
//! extensions, and maps scan-type keywords to their single letter suffix.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Static codec data, immutable once loaded.
///
/// The default table covers every codec seen on DVD, BluRay and UHD BluRay
/// discs. A caller may replace any of the maps through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecTable {
    /// Video codec display name -> filename token (e.g. "MPEG-4 AVC Video" -> "AVC").
    pub video: BTreeMap<String, String>,
    /// Audio codec display name -> filename token (e.g. "DTS-HD Master Audio" -> "DTS-HD.MA").
    pub audio: BTreeMap<String, String>,
    /// Scan type keyword -> suffix letter (e.g. "progressive" -> "p").
    pub scan_types: BTreeMap<String, String>,
    /// Audio codecs carrying object based (Atmos) audio.
    pub atmos: BTreeSet<String>,
    /// Codec display name -> elementary stream extension.
    pub extensions: BTreeMap<String, String>,
}

const VIDEO_CODECS: &[(&str, &str, &str)] = &[
    ("MPEG-1 Video", "MPEG-1", ".m1v"),
    ("MPEG-2 Video", "MPEG-2", ".m2v"),
    ("MPEG-4 AVC Video", "AVC", ".h264"),
    ("MPEG-H HEVC Video", "HEVC", ".h265"),
    ("VC-1 Video", "VC-1", ".vc1"),
];

const AUDIO_CODECS: &[(&str, &str, &str)] = &[
    ("AAC Audio", "AAC", ".aac"),
    ("DTS Audio", "DTS", ".dts"),
    ("DTS-HD High-Res Audio", "DTS-HD.HR", ".dtshr"),
    ("DTS-HD Master Audio", "DTS-HD.MA", ".dtsma"),
    ("DTS:X Master Audio", "DTS-X", ".dtsma"),
    ("Dolby Digital Audio", "DD", ".ac3"),
    ("Dolby Digital Plus Audio", "DDP", ".eac3"),
    ("Dolby Digital Plus/Atmos Audio", "DDP", ".eac3"),
    ("Dolby TrueHD Audio", "TrueHD", ".thd"),
    ("Dolby TrueHD/Atmos Audio", "TrueHD", ".thd"),
    ("FLAC Audio", "FLAC", ".flac"),
    ("LPCM Audio", "LPCM", ".pcm"),
];

const ATMOS_CODECS: &[&str] = &["Dolby Digital Plus/Atmos Audio", "Dolby TrueHD/Atmos Audio"];

const SCAN_TYPES: &[(&str, &str)] = &[
    ("interlaced", "i"),
    ("mbaff", "i"),
    ("paff", "i"),
    ("progressive", "p"),
];

impl Default for CodecTable {
    fn default() -> Self {
        let mut video = BTreeMap::new();
        let mut audio = BTreeMap::new();
        let mut extensions = BTreeMap::new();

        for (name, token, ext) in VIDEO_CODECS {
            video.insert(name.to_string(), token.to_string());
            extensions.insert(name.to_string(), ext.to_string());
        }
        for (name, token, ext) in AUDIO_CODECS {
            audio.insert(name.to_string(), token.to_string());
            extensions.insert(name.to_string(), ext.to_string());
        }

        Self {
            video,
            audio,
            scan_types: SCAN_TYPES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            atmos: ATMOS_CODECS.iter().map(|s| s.to_string()).collect(),
            extensions,
        }
    }
}

impl CodecTable {
    /// Returns true if `name` is a known video codec display name.
    pub fn is_video_codec(&self, name: &str) -> bool {
        self.video.contains_key(name.trim())
    }

    /// Returns true if `name` is a known audio codec display name.
    pub fn is_audio_codec(&self, name: &str) -> bool {
        self.audio.contains_key(name.trim())
    }

    /// Filename token for a video codec display name.
    pub fn video_token(&self, name: &str) -> Option<&str> {
        self.video.get(name.trim()).map(String::as_str)
    }

    /// Filename token for an audio codec display name.
    pub fn audio_token(&self, name: &str) -> Option<&str> {
        self.audio.get(name.trim()).map(String::as_str)
    }

    /// Suffix letter for a scan type keyword, case-insensitive.
    ///
    /// Accepts both MediaInfo keywords ("Progressive", "MBAFF") and the bare
    /// letters found at the end of a BDInfo resolution ("1080p" -> "p").
    pub fn scan_type_letter(&self, scan_type: &str) -> Option<&str> {
        let key = scan_type.trim().to_lowercase();
        if let Some(letter) = self.scan_types.get(&key) {
            return Some(letter.as_str());
        }
        self.scan_types
            .values()
            .find(|letter| letter.as_str() == key)
            .map(String::as_str)
    }

    /// Returns true if the audio codec carries Atmos objects.
    pub fn is_atmos(&self, name: &str) -> bool {
        self.atmos.contains(name.trim())
    }

    /// Elementary stream extension for a codec display name.
    pub fn extension(&self, name: &str) -> Option<&str> {
        self.extensions.get(name.trim()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens() {
        let codecs = CodecTable::default();
        assert_eq!(codecs.video_token("MPEG-4 AVC Video"), Some("AVC"));
        assert_eq!(codecs.video_token("MPEG-H HEVC Video"), Some("HEVC"));
        assert_eq!(codecs.audio_token("DTS-HD Master Audio"), Some("DTS-HD.MA"));
        assert_eq!(codecs.audio_token("Dolby Digital Audio"), Some("DD"));
        assert_eq!(codecs.audio_token("Unknown Audio"), None);
    }

    #[test]
    fn test_scan_type_letters() {
        let codecs = CodecTable::default();
        assert_eq!(codecs.scan_type_letter("Progressive"), Some("p"));
        assert_eq!(codecs.scan_type_letter("MBAFF"), Some("i"));
        assert_eq!(codecs.scan_type_letter("i"), Some("i"));
        assert_eq!(codecs.scan_type_letter("x"), None);
    }

    #[test]
    fn test_atmos_and_extensions() {
        let codecs = CodecTable::default();
        assert!(codecs.is_atmos("Dolby TrueHD/Atmos Audio"));
        assert!(!codecs.is_atmos("Dolby TrueHD Audio"));
        assert_eq!(codecs.extension("FLAC Audio"), Some(".flac"));
        assert_eq!(codecs.extension("VC-1 Video"), Some(".vc1"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{"video": {"AV1 Video": "AV1"}}"#;
        let codecs: CodecTable = serde_json::from_str(json).unwrap();
        assert_eq!(codecs.video_token("AV1 Video"), Some("AV1"));
        assert!(codecs.video_token("MPEG-4 AVC Video").is_none());
        assert_eq!(codecs.audio_token("FLAC Audio"), Some("FLAC"));
    }
}
