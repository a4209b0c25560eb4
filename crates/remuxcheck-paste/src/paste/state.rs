//! Paste section state machine.
//!
//! [`transition`] is the whole machine: given the current state and one
//! non-blank line it returns the next state and what, if anything, the line
//! contributes to the output. It holds no other state.

use super::rows;
use crate::bdinfo::{BdAudioTrack, BdInfoKind};
use crate::codecs::CodecTable;
use tracing::debug;

/// A table inside a BDInfo playlist report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaylistTable {
    Video,
    Audio,
    Subtitles,
}

/// Which part of the paste the current line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Outside any recognized report; lines are ignored.
    #[default]
    None,
    QuickSummary,
    /// `table` is the most recent table header; `in_table` becomes true
    /// after the dashed rule under it.
    PlaylistReport {
        table: Option<PlaylistTable>,
        in_table: bool,
    },
    MediaInfo,
    Eac3toLog,
}

/// Full parser state.
///
/// The `seen_*` flags remember that a BDInfo or MediaInfo dump was already
/// captured so a repeated dump is routed to [`Section::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParserState {
    pub section: Section,
    pub seen_bdinfo: bool,
    pub seen_mediainfo: bool,
}

/// What a single line contributes to the parse output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Nothing,
    /// A BDInfo header was accepted.
    BdInfoHeader(BdInfoKind),
    Video(String),
    Audio(Vec<BdAudioTrack>),
    Subtitle(String),
    MediaInfoLine(String),
    /// First line of a new eac3to log.
    Eac3toStart(String),
    Eac3toLine(String),
}

enum Header {
    QuickSummary,
    PlaylistReport,
    General,
    Eac3to,
}

fn header(lowered: &str) -> Option<Header> {
    if lowered.starts_with("quick summary") {
        Some(Header::QuickSummary)
    } else if lowered.starts_with("playlist report") {
        Some(Header::PlaylistReport)
    } else if lowered == "general" {
        Some(Header::General)
    } else if lowered.starts_with("eac3to v") {
        Some(Header::Eac3to)
    } else {
        None
    }
}

/// An upper-case playlist sub-header such as `FILES:` or `STREAM DIAGNOSTICS:`.
fn is_playlist_subheader(trimmed: &str) -> bool {
    trimmed.len() > 1
        && trimmed.ends_with(':')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == ' ' || c == ':')
}

/// Advances the machine by one non-blank line.
pub fn transition(state: ParserState, line: &str, codecs: &CodecTable) -> (ParserState, Emission) {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();

    if let Some(header) = header(&lowered) {
        return enter(state, header, line);
    }

    match state.section {
        Section::None => (state, Emission::Nothing),
        Section::QuickSummary => (state, quick_summary_line(&lowered, line, codecs)),
        Section::PlaylistReport { table, in_table } => {
            playlist_line(state, table, in_table, trimmed, &lowered, line)
        }
        Section::MediaInfo => (state, Emission::MediaInfoLine(line.to_string())),
        Section::Eac3toLog => {
            if lowered.starts_with("done.") {
                (with_section(state, Section::None), Emission::Nothing)
            } else {
                (state, Emission::Eac3toLine(line.to_string()))
            }
        }
    }
}

fn with_section(state: ParserState, section: Section) -> ParserState {
    ParserState { section, ..state }
}

fn enter(state: ParserState, header: Header, line: &str) -> (ParserState, Emission) {
    match header {
        Header::QuickSummary | Header::PlaylistReport if state.seen_bdinfo => {
            debug!(line, "ignoring repeated BDInfo report");
            (with_section(state, Section::None), Emission::Nothing)
        }
        Header::QuickSummary => (
            ParserState {
                section: Section::QuickSummary,
                seen_bdinfo: true,
                ..state
            },
            Emission::BdInfoHeader(BdInfoKind::QuickSummary),
        ),
        Header::PlaylistReport => (
            ParserState {
                section: Section::PlaylistReport {
                    table: None,
                    in_table: false,
                },
                seen_bdinfo: true,
                ..state
            },
            Emission::BdInfoHeader(BdInfoKind::PlaylistReport),
        ),
        Header::General if state.seen_mediainfo => {
            debug!("ignoring repeated MediaInfo report");
            (with_section(state, Section::None), Emission::Nothing)
        }
        Header::General => (
            ParserState {
                section: Section::MediaInfo,
                seen_mediainfo: true,
                ..state
            },
            Emission::MediaInfoLine(line.to_string()),
        ),
        Header::Eac3to => (
            with_section(state, Section::Eac3toLog),
            Emission::Eac3toStart(line.to_string()),
        ),
    }
}

fn quick_summary_line(lowered: &str, line: &str, codecs: &CodecTable) -> Emission {
    let value = rows::label_value(line);
    let emission = if lowered.starts_with("video:") {
        rows::quick_summary_video(value).map(Emission::Video)
    } else if lowered.starts_with("audio:") {
        let tracks = rows::quick_summary_audio(value, codecs);
        (!tracks.is_empty()).then_some(Emission::Audio(tracks))
    } else if lowered.starts_with("subtitle:") {
        rows::quick_summary_subtitle(value).map(Emission::Subtitle)
    } else {
        return Emission::Nothing;
    };

    emission.unwrap_or_else(|| {
        debug!(line, "dropping empty quick summary row");
        Emission::Nothing
    })
}

fn playlist_line(
    state: ParserState,
    table: Option<PlaylistTable>,
    in_table: bool,
    trimmed: &str,
    lowered: &str,
    line: &str,
) -> (ParserState, Emission) {
    let reopen = |table| {
        let section = Section::PlaylistReport {
            table,
            in_table: false,
        };
        (with_section(state, section), Emission::Nothing)
    };

    if lowered.starts_with("video:") {
        return reopen(Some(PlaylistTable::Video));
    }
    if lowered.starts_with("audio:") {
        return reopen(Some(PlaylistTable::Audio));
    }
    if lowered.starts_with("subtitles:") {
        return reopen(Some(PlaylistTable::Subtitles));
    }
    if is_playlist_subheader(trimmed) {
        return reopen(None);
    }

    if trimmed.starts_with("-----") {
        let section = Section::PlaylistReport {
            table,
            in_table: table.is_some(),
        };
        return (with_section(state, section), Emission::Nothing);
    }

    // A leading minus marks a stream that was not muxed.
    if trimmed.starts_with('-') || !in_table {
        return (state, Emission::Nothing);
    }

    let emission = match table {
        Some(PlaylistTable::Video) => rows::playlist_video(line).map(Emission::Video),
        Some(PlaylistTable::Audio) => {
            let tracks = rows::playlist_audio(line);
            (!tracks.is_empty()).then_some(Emission::Audio(tracks))
        }
        Some(PlaylistTable::Subtitles) => rows::playlist_subtitle(line).map(Emission::Subtitle),
        None => Some(Emission::Nothing),
    };

    let emission = emission.unwrap_or_else(|| {
        debug!(line, "dropping malformed playlist row");
        Emission::Nothing
    });
    (state, emission)
}
