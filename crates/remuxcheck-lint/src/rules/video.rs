//! Video track rule.

use crate::diff::mismatch_detail;
use crate::report::{ReportEntry, RuleSection};
use crate::rules::helpers::{format_number, number};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use remuxcheck_paste::normalize::{digits, FIELD_SEPARATOR};
use remuxcheck_paste::VideoTrack;

/// Returns all video rules, in report order.
pub fn all_rules() -> Vec<Box<dyn CheckRule>> {
    vec![Box::new(VideoTrackNameRule)]
}

/// Rebuilds a DVD video title from MediaInfo fields:
/// `MPEG-2 Video / 9800 kbps / 480i / 29.97 fps / 4:3`.
///
/// Returns `None` when one of the fields is missing.
pub fn dvd_video_title(ctx: &CheckContext, video: &VideoTrack) -> Option<String> {
    let format = video.format.as_deref()?.split_whitespace().next()?;
    let version = digits(video.format_version.as_deref()?);
    let bit_rate = digits(video.bit_rate.as_deref()?);
    let height = digits(video.height.as_deref()?);
    let scan = ctx
        .codecs()
        .scan_type_letter(video.scan_type.as_deref()?)
        .unwrap_or_default();
    let fps = number(video.frame_rate.as_deref()?)?;
    let aspect_ratio = video.display_aspect_ratio.as_deref()?;

    Some(format!(
        "{}-{} Video / {} kbps / {}{} / {} fps / {}",
        format,
        version,
        bit_rate,
        height,
        scan,
        format_number(fps),
        aspect_ratio.trim()
    ))
}

/// Returns true for a BDInfo video name flagged interlaced at 1080 lines and
/// 25 fps, which is progressive content.
fn actually_progressive(bdinfo_video: &str) -> bool {
    let fields: Vec<&str> = bdinfo_video.split(FIELD_SEPARATOR).map(str::trim).collect();
    let (Some(resolution), Some(fps)) = (fields.get(2), fields.get(3)) else {
        return false;
    };
    resolution.eq_ignore_ascii_case("1080i") && number(fps) == Some(25.0)
}

/// Rule: video/track-name
pub struct VideoTrackNameRule;

impl VideoTrackNameRule {
    fn compare(&self, expected_label: &str, expected: &str, actual: &str) -> ReportEntry {
        if expected == actual {
            ReportEntry::correct(format!("Video track names match: `{}`", actual))
        } else {
            ReportEntry::error("Video track names mismatch").with_detail(mismatch_detail(
                "MediaInfo",
                actual,
                expected_label,
                expected,
            ))
        }
    }
}

impl CheckRule for VideoTrackNameRule {
    fn id(&self) -> &'static str {
        "video/track-name"
    }

    fn section(&self) -> RuleSection {
        RuleSection::VideoAudio
    }

    fn description(&self) -> &'static str {
        "Video track name matches BDInfo (or the DVD fields)"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking video track name"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let mut entries = Vec::new();
        let video = ctx.mediainfo.video.first();

        if ctx.source.is_dvd() {
            let rebuilt = video.and_then(|v| Some((dvd_video_title(ctx, v)?, v.title.as_deref()?)));
            match rebuilt {
                Some((expected, actual)) => entries.push(self.compare("Expected", &expected, actual)),
                None => entries.push(ReportEntry::error("Could not verify video track")),
            }
            return Ok(entries);
        }

        let Some(bdinfo_video) = ctx.bdinfo.primary_video() else {
            entries.push(ReportEntry::error("Missing BDInfo video track"));
            return Ok(entries);
        };
        let Some(title) = video.and_then(|v| v.title.as_deref()) else {
            entries.push(ReportEntry::error("Missing MediaInfo video track"));
            return Ok(entries);
        };

        if ctx.bdinfo.video.len() > 1 {
            entries.push(ReportEntry::warning(format!(
                "BDInfo lists {} video tracks, only the first is checked",
                ctx.bdinfo.video.len()
            )));
        }
        if actually_progressive(bdinfo_video) {
            entries.push(ReportEntry::info("Note: 1080i @ 25fps is actually progressive"));
        }
        entries.push(self.compare("BDInfo", bdinfo_video, title));
        Ok(entries)
    }
}
