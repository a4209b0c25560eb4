//! Release filename reconstruction.
//!
//! The expected filename is rebuilt from the MediaInfo and BDInfo records:
//!
//! ```text
//! Title.Year[.Hybrid][.REPACK][.Cut].<resolution><scan>.<source>.<video>.<audio>.<channels>-<group>.mkv
//! ```
//!
//! One candidate is built per cut (no cut first). Internal submissions must
//! equal a candidate; external ones only have to contain one, so any
//! release group suffix is accepted.

use crate::diff::mismatch_detail;
use crate::report::{ReportEntry, RuleSection};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use regex::Regex;
use remuxcheck_paste::normalize::{digits, is_number, FIELD_SEPARATOR};
use remuxcheck_paste::SourceKind;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Group shown in the expected name of external submissions.
pub const EXTERNAL_GROUP_PLACEHOLDER: &str = "GRouP";

static TV_EPISODE_RE: OnceLock<Regex> = OnceLock::new();
static MOVIE_YEAR_RE: OnceLock<Regex> = OnceLock::new();

fn tv_episode_regex() -> &'static Regex {
    TV_EPISODE_RE
        .get_or_init(|| Regex::new(r"(.+)\s-\s(S\d{2}(E\d{2})+)").expect("invalid regex pattern"))
}

fn movie_year_regex() -> &'static Regex {
    MOVIE_YEAR_RE.get_or_init(|| Regex::new(r"(.+)\s\((\d{4})\)").expect("invalid regex pattern"))
}

/// Formats a movie or show name for a filename: `"Amélie & Co."` -> `"Amelie.and.Co"`.
pub fn format_filename_title(title: &str) -> String {
    // Compatibility decomposition splits off combining marks, which are not ASCII.
    let folded: String = title.trim().nfkd().filter(char::is_ascii).collect();
    let cleaned: String = folded
        .replace('&', "and")
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(".")
}

/// Expected filenames for one paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseName {
    /// One candidate per cut, no cut first.
    pub candidates: Vec<String>,
    /// Codec names without a filename token.
    pub problems: Vec<ReportEntry>,
}

impl ReleaseName {
    /// Builds the candidates for a submission named `complete_name`.
    ///
    /// Returns `Ok(None)` when MediaInfo lacks the fields a name is built from.
    pub fn build(ctx: &CheckContext, complete_name: &str) -> Result<Option<Self>, RuleFailure> {
        let Some(general) = ctx.mediainfo.general() else {
            return Ok(None);
        };
        let (Some(movie_name), Some(video), Some(audio)) = (
            general.movie_name.as_deref(),
            ctx.mediainfo.video.first(),
            ctx.mediainfo.audio.first(),
        ) else {
            return Ok(None);
        };
        let (Some(height), Some(video_title), Some(audio_title)) = (
            video.height.as_deref(),
            video.title.as_deref(),
            audio.title.as_deref(),
        ) else {
            return Ok(None);
        };

        let mut problems = Vec::new();
        let codecs = ctx.codecs();

        let title = if let Some(caps) = tv_episode_regex().captures(movie_name) {
            format!("{}.{}", format_filename_title(&caps[1]), caps[2].trim())
        } else if let Some(caps) = movie_year_regex().captures(movie_name) {
            format!("{}.{}", format_filename_title(&caps[1]), caps[2].trim())
        } else {
            format_filename_title(movie_name)
        };

        let height = digits(height);
        let source = match ctx.source {
            SourceKind::Dvd => match video.standard.as_deref() {
                Some(standard) => format!(".{}.DVD.REMUX", standard.trim()),
                None => ".DVD.REMUX".to_string(),
            },
            SourceKind::UhdBluRay => {
                let mut source = format!(".{}{}.UHD.BluRay.REMUX", height, scan_type(ctx)?);
                if video
                    .hdr_format
                    .as_deref()
                    .is_some_and(|hdr| hdr.contains("Dolby Vision"))
                {
                    source.push_str(".DV");
                }
                if video.color_primaries.as_deref().map(str::trim) == Some("BT.2020") {
                    source.push_str(".HDR");
                } else {
                    source.push_str(".SDR");
                }
                source
            }
            SourceKind::HdBluRay => format!(".{}{}.BluRay.REMUX", height, scan_type(ctx)?),
        };

        let video_codec = video_title.split(FIELD_SEPARATOR).next().unwrap_or_default().trim();
        let video_part = match codecs.video_token(video_codec) {
            Some(token) => format!(".{}", token),
            None => {
                problems.push(ReportEntry::error(format!(
                    "No title name found for video codec: `{}`",
                    video_codec
                )));
                String::new()
            }
        };

        let mut audio_part = String::new();
        let mut codec_seen = false;
        let mut atmos = false;
        for part in audio_title.split(FIELD_SEPARATOR).map(str::trim) {
            if !codec_seen && codecs.is_audio_codec(part) {
                match codecs.audio_token(part).filter(|t| !t.is_empty()) {
                    Some(token) => {
                        audio_part.push('.');
                        audio_part.push_str(token);
                    }
                    None => problems.push(ReportEntry::error(format!(
                        "No title name found for audio codec: `{}`",
                        part
                    ))),
                }
                codec_seen = true;
                atmos = codecs.is_atmos(part);
                continue;
            }
            // "7.1+11 objects" names the bed channels first
            let channels = part.split('+').next().unwrap_or_default().trim();
            if codec_seen && is_number(channels) {
                audio_part.push('.');
                audio_part.push_str(channels);
                if atmos {
                    audio_part.push_str(".Atmos");
                }
                break;
            }
        }

        let suffix = if ctx.is_internal() {
            format!("-{}.mkv", ctx.config.release_group)
        } else {
            "-".to_string()
        };

        let lowercase = complete_name.to_lowercase();
        let hybrid = lowercase.contains("hybrid");
        let repack = lowercase.contains("repack");

        let candidates = ctx
            .config
            .cut_candidates()
            .into_iter()
            .map(|cut| {
                let mut name = title.clone();
                if hybrid {
                    name.push_str(".Hybrid");
                }
                if repack {
                    name.push_str(".REPACK");
                }
                if let Some(cut) = cut {
                    name.push('.');
                    name.push_str(cut);
                }
                name.push_str(&source);
                name.push_str(&video_part);
                name.push_str(&audio_part);
                name.push_str(&suffix);
                name
            })
            .collect();

        Ok(Some(Self {
            candidates,
            problems,
        }))
    }
}

/// Scan letter of the primary video.
///
/// Taken from the BDInfo resolution (`1080p` -> `p`) when available, else
/// from MediaInfo's scan type.
fn scan_type(ctx: &CheckContext) -> Result<String, RuleFailure> {
    let codecs = ctx.codecs();
    let from_bdinfo = ctx
        .bdinfo
        .primary_video()
        .and_then(|video| video.split(FIELD_SEPARATOR).nth(2))
        .and_then(|resolution| resolution.trim().chars().last())
        .and_then(|letter| codecs.scan_type_letter(&letter.to_string()));
    let from_mediainfo = || {
        ctx.mediainfo
            .video
            .first()
            .and_then(|v| v.scan_type.as_deref())
            .and_then(|scan| codecs.scan_type_letter(scan))
    };

    from_bdinfo
        .or_else(from_mediainfo)
        .map(str::to_string)
        .ok_or_else(|| RuleFailure::missing("video scan type"))
}

/// Basename after the last `\` or `/`.
fn basename(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

/// Rule: metadata/filename
/// The file is named after the release naming convention.
pub struct FilenameRule;

impl CheckRule for FilenameRule {
    fn id(&self) -> &'static str {
        "metadata/filename"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "Filename matches the name rebuilt from the tracks"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking filename"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let cannot_validate = || -> Result<Vec<ReportEntry>, RuleFailure> {
            Ok(vec![ReportEntry::error("Cannot validate filename")])
        };

        let Some(complete_name) = ctx.mediainfo.general().and_then(|g| g.complete_name.as_deref())
        else {
            return cannot_validate();
        };
        let complete_name = basename(complete_name.trim());

        let Some(release) = ReleaseName::build(ctx, complete_name)? else {
            return cannot_validate();
        };

        let mut entries = release.problems;
        let candidates = &release.candidates;

        let exact = ctx.is_internal() && candidates.iter().any(|c| c == complete_name);
        let partial = candidates.iter().any(|c| complete_name.contains(c.as_str()));
        if exact || partial {
            entries.push(ReportEntry::correct(format!("Filename: `{}`", complete_name)));
            return Ok(entries);
        }

        let cut_index = ctx
            .config
            .cuts
            .iter()
            .position(|cut| complete_name.contains(cut.as_str()))
            .map_or(0, |i| i + 1);
        let mut expected = candidates[cut_index].clone();
        if !ctx.is_internal() {
            expected.push_str(EXTERNAL_GROUP_PLACEHOLDER);
            expected.push_str(".mkv");
        }

        entries.push(
            ReportEntry::error("Filename mismatch").with_detail(mismatch_detail(
                "Filename",
                complete_name,
                "Expected",
                &expected,
            )),
        );
        Ok(entries)
    }
}
