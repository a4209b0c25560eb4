//! MediaInfo structured parser.
//!
//! Turns the raw MediaInfo lines captured by the paste parser into typed
//! section records. Values are kept as the raw strings MediaInfo printed;
//! coercion is left to the code that reads them.

mod chapters;
pub mod records;

#[cfg(test)]
mod tests;

pub use records::{
    format_key, AudioTrack, Chapter, ChapterTitle, GeneralInfo, MediaInfoReport, TextTrack,
    TrackFields, VideoTrack,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A MediaInfo section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    General,
    Video,
    Audio,
    Text,
    Menu,
}

impl SectionKind {
    /// Section name as MediaInfo prints it, lowercased.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::General => "general",
            SectionKind::Video => "video",
            SectionKind::Audio => "audio",
            SectionKind::Text => "text",
            SectionKind::Menu => "menu",
        }
    }
}

/// Returns the section a header line opens, if it is one.
///
/// A header's first word is a section name (`"Audio #2"`, `"Menu"`) and the
/// line carries no `" : "` key/value separator.
pub fn section_header(line: &str) -> Option<SectionKind> {
    if line.contains(" : ") {
        return None;
    }
    let word = line.split_whitespace().next()?.to_lowercase();
    match word.as_str() {
        "general" => Some(SectionKind::General),
        "video" => Some(SectionKind::Video),
        "audio" => Some(SectionKind::Audio),
        "text" => Some(SectionKind::Text),
        "menu" => Some(SectionKind::Menu),
        _ => None,
    }
}

/// Parses MediaInfo lines into a [`MediaInfoReport`].
///
/// Every header opens a new record, so each section list is exactly as long
/// as the number of headers of that kind. Lines before the first header and
/// key/value lines without a `" : "` separator are dropped.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> MediaInfoReport {
    let mut report = MediaInfoReport::default();
    let mut current: Option<SectionKind> = None;

    for line in lines.iter().map(AsRef::as_ref) {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(kind) = section_header(line) {
            trace!(section = kind.as_str(), "mediainfo section");
            open_section(&mut report, kind);
            current = Some(kind);
            continue;
        }

        match current {
            None => debug!(line, "dropping mediainfo line outside any section"),
            Some(SectionKind::Menu) => {
                if let Some(menu) = report.menu.last_mut() {
                    menu.push(chapters::parse_chapter(line));
                }
            }
            Some(kind) => match line.split_once(" : ") {
                Some((key, value)) => insert(&mut report, kind, format_key(key), value.trim()),
                None => debug!(line, "dropping mediainfo line without separator"),
            },
        }
    }

    report
}

fn open_section(report: &mut MediaInfoReport, kind: SectionKind) {
    match kind {
        SectionKind::General => report.general.push(GeneralInfo::default()),
        SectionKind::Video => report.video.push(VideoTrack::default()),
        SectionKind::Audio => report.audio.push(AudioTrack::default()),
        SectionKind::Text => report.text.push(TextTrack::default()),
        SectionKind::Menu => report.menu.push(Vec::new()),
    }
}

fn insert(report: &mut MediaInfoReport, kind: SectionKind, key: String, value: &str) {
    let record: Option<&mut dyn TrackFields> = match kind {
        SectionKind::General => report.general.last_mut().map(|r| r as &mut dyn TrackFields),
        SectionKind::Video => report.video.last_mut().map(|r| r as &mut dyn TrackFields),
        SectionKind::Audio => report.audio.last_mut().map(|r| r as &mut dyn TrackFields),
        SectionKind::Text => report.text.last_mut().map(|r| r as &mut dyn TrackFields),
        SectionKind::Menu => None,
    };
    if let Some(record) = record {
        record.insert(key, value.to_string());
    }
}
