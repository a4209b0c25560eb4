//! BDInfo disc report records.

use serde::{Deserialize, Serialize};

/// Which BDInfo layout the report was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BdInfoKind {
    /// The compact `QUICK SUMMARY:` block.
    QuickSummary,
    /// The verbose `PLAYLIST REPORT:` tables.
    PlaylistReport,
}

/// One BDInfo audio stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdAudioTrack {
    /// Normalized composite name, codec first
    /// (e.g. `"DTS-HD Master Audio / 5.1 / 48 kHz / 2040 kbps / 24-bit"`).
    pub name: String,
    /// Stream language, when the layout provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl BdAudioTrack {
    /// Creates an audio track.
    pub fn new(name: impl Into<String>, language: Option<String>) -> Self {
        Self {
            name: name.into(),
            language,
        }
    }

    /// Returns the `" / "` separated fields of the name.
    pub fn fields(&self) -> Vec<&str> {
        self.name.split(crate::normalize::FIELD_SEPARATOR).collect()
    }

    /// Codec display name (first field).
    pub fn codec(&self) -> &str {
        self.name
            .split(crate::normalize::FIELD_SEPARATOR)
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Structured BDInfo report.
///
/// Built once per paste. `video` normally holds one entry; more than one
/// means the paste lists several video streams and is reported by the rules
/// rather than truncated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BdInfoReport {
    /// Layout the report came from; `None` when no BDInfo header was seen.
    pub kind: Option<BdInfoKind>,
    /// Normalized video track names.
    pub video: Vec<String>,
    /// Audio tracks in disc order, compatibility tracks split out.
    pub audio: Vec<BdAudioTrack>,
    /// Subtitle tracks (`"<language> / <n> kbps"`).
    pub subtitle: Vec<String>,
}

impl BdInfoReport {
    /// Returns true if no BDInfo section was captured.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.video.is_empty() && self.audio.is_empty() && self.subtitle.is_empty()
    }

    /// First video track, if any.
    pub fn primary_video(&self) -> Option<&str> {
        self.video.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_track_fields() {
        let track = BdAudioTrack::new(
            "Dolby TrueHD/Atmos Audio / 7.1 / 48 kHz / 4291 kbps / 24-bit",
            Some("English".to_string()),
        );
        assert_eq!(track.codec(), "Dolby TrueHD/Atmos Audio");
        assert_eq!(track.fields().len(), 5);
        assert_eq!(track.fields()[1], "7.1");
    }

    #[test]
    fn test_empty_report() {
        let report = BdInfoReport::default();
        assert!(report.is_empty());
        assert!(report.primary_video().is_none());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&BdInfoKind::PlaylistReport).unwrap();
        assert_eq!(json, "\"playlist_report\"");
    }
}
