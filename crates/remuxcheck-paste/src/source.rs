//! Disc source detection.

use crate::bdinfo::BdInfoReport;
use crate::mediainfo::MediaInfoReport;
use crate::normalize::digits;
use serde::{Deserialize, Serialize};

/// Largest DVD frame height (PAL).
const DVD_MAX_HEIGHT: u32 = 576;
const UHD_HEIGHT: u32 = 2160;

/// Kind of disc a remux was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Dvd,
    HdBluRay,
    UhdBluRay,
}

impl SourceKind {
    /// Detects the source from the primary video streams.
    ///
    /// DVD remuxes carry MPEG video at SD height and come without a BDInfo
    /// video track; 2160-line video on either side means UHD BluRay.
    pub fn detect(bdinfo: &BdInfoReport, mediainfo: &MediaInfoReport) -> Self {
        let video = mediainfo.video.first();
        let height = video
            .and_then(|v| v.height.as_deref())
            .and_then(|h| digits(h).parse::<u32>().ok());
        let format = video.and_then(|v| v.format.as_deref()).unwrap_or_default();

        if bdinfo.video.is_empty()
            && format.trim() == "MPEG Video"
            && height.is_some_and(|h| h <= DVD_MAX_HEIGHT)
        {
            return SourceKind::Dvd;
        }

        let bdinfo_uhd = bdinfo
            .primary_video()
            .is_some_and(|v| v.split(" / ").any(|field| field.trim().starts_with("2160")));
        if height == Some(UHD_HEIGHT) || bdinfo_uhd {
            return SourceKind::UhdBluRay;
        }

        SourceKind::HdBluRay
    }

    pub fn is_dvd(self) -> bool {
        self == SourceKind::Dvd
    }

    pub fn is_uhd(self) -> bool {
        self == SourceKind::UhdBluRay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediainfo::VideoTrack;

    fn mediainfo_video(format: &str, height: &str) -> MediaInfoReport {
        MediaInfoReport {
            video: vec![VideoTrack {
                format: Some(format.to_string()),
                height: Some(height.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_dvd() {
        let mediainfo = mediainfo_video("MPEG Video", "480 pixels");
        assert_eq!(SourceKind::detect(&BdInfoReport::default(), &mediainfo), SourceKind::Dvd);
    }

    #[test]
    fn test_detect_uhd() {
        let mediainfo = mediainfo_video("HEVC", "2 160 pixels");
        let source = SourceKind::detect(&BdInfoReport::default(), &mediainfo);
        assert!(source.is_uhd());

        let bdinfo = BdInfoReport {
            video: vec!["MPEG-H HEVC Video / 55000 kbps / 2160p / 23.976 fps / 16:9".to_string()],
            ..Default::default()
        };
        assert!(SourceKind::detect(&bdinfo, &MediaInfoReport::default()).is_uhd());
    }

    #[test]
    fn test_detect_hd() {
        let mediainfo = mediainfo_video("AVC", "1 080 pixels");
        let bdinfo = BdInfoReport {
            video: vec!["MPEG-4 AVC Video / 29998 kbps / 1080p / 23.976 fps / 16:9".to_string()],
            ..Default::default()
        };
        assert_eq!(SourceKind::detect(&bdinfo, &mediainfo), SourceKind::HdBluRay);
    }
}
