//! Paste structural parser.
//!
//! Splits one raw paste into its BDInfo report, the raw MediaInfo lines and
//! any eac3to logs. Parsing never fails: unrecognized text is ignored and
//! malformed rows are dropped.

mod rows;
mod state;


pub use state::{transition, Emission, ParserState, PlaylistTable, Section};

use crate::bdinfo::BdInfoReport;
use crate::codecs::CodecTable;
use crate::eac3to::Eac3toLogSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// How the ignore-after marker is matched against a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreAfterMethod {
    /// The trimmed line equals the marker.
    #[default]
    Equals,
    /// The line contains the marker.
    Contains,
}

/// Line skipping directives applied before section parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Everything from the first line matching this marker on is discarded.
    pub ignore_after_line: Option<String>,
    pub ignore_after_line_method: IgnoreAfterMethod,
    /// A line starting with one of these (case-insensitive) drops every
    /// following line up to the next blank line.
    pub ignore_until_blank_line_prefixes: Vec<String>,
}

impl ParserConfig {
    fn is_ignore_after_line(&self, line: &str) -> bool {
        let Some(marker) = self.ignore_after_line.as_deref() else {
            return false;
        };
        if marker.is_empty() {
            return false;
        }
        match self.ignore_after_line_method {
            IgnoreAfterMethod::Equals => line.trim() == marker.trim(),
            IgnoreAfterMethod::Contains => line.contains(marker),
        }
    }

    fn starts_ignore_block(&self, line: &str) -> bool {
        let lowered = line.trim().to_lowercase();
        self.ignore_until_blank_line_prefixes
            .iter()
            .map(|prefix| prefix.trim().to_lowercase())
            .any(|prefix| !prefix.is_empty() && lowered.starts_with(&prefix))
    }
}

/// Output of [`PasteParser::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPaste {
    pub bdinfo: BdInfoReport,
    /// MediaInfo lines, header lines included, blank lines removed.
    pub mediainfo: Vec<String>,
    pub eac3to: Eac3toLogSet,
}

/// Line-oriented paste parser.
#[derive(Debug, Clone, Default)]
pub struct PasteParser {
    config: ParserConfig,
    codecs: CodecTable,
}

impl PasteParser {
    /// Creates a parser with the given skip directives and the built-in codec table.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            codecs: CodecTable::default(),
        }
    }

    /// Replaces the codec table used to recognize audio codecs.
    pub fn with_codecs(mut self, codecs: CodecTable) -> Self {
        self.codecs = codecs;
        self
    }

    /// Parses a paste.
    pub fn parse(&self, text: &str) -> ParsedPaste {
        let mut out = ParsedPaste::default();
        let mut state = ParserState::default();
        let mut skipping = false;

        for line in text.lines() {
            if self.config.is_ignore_after_line(line) {
                debug!(line, "ignore-after marker reached");
                break;
            }
            if line.trim().is_empty() {
                skipping = false;
                continue;
            }
            if skipping {
                continue;
            }
            if self.config.starts_ignore_block(line) {
                skipping = true;
                continue;
            }

            let (next, emission) = transition(state, line, &self.codecs);
            if next.section != state.section {
                trace!(from = ?state.section, to = ?next.section, "paste section change");
            }
            state = next;
            apply(&mut out, emission);
        }

        debug!(
            video = out.bdinfo.video.len(),
            audio = out.bdinfo.audio.len(),
            subtitles = out.bdinfo.subtitle.len(),
            mediainfo_lines = out.mediainfo.len(),
            eac3to_logs = out.eac3to.len(),
            "parsed paste"
        );
        out
    }
}

fn apply(out: &mut ParsedPaste, emission: Emission) {
    match emission {
        Emission::Nothing => {}
        Emission::BdInfoHeader(kind) => out.bdinfo.kind = Some(kind),
        Emission::Video(name) => out.bdinfo.video.push(name),
        Emission::Audio(tracks) => out.bdinfo.audio.extend(tracks),
        Emission::Subtitle(name) => out.bdinfo.subtitle.push(name),
        Emission::MediaInfoLine(line) => out.mediainfo.push(line),
        Emission::Eac3toStart(line) => out.eac3to.start_log(line),
        Emission::Eac3toLine(line) => out.eac3to.push_line(line),
    }
}

/// Parses a paste with no skip directives.
pub fn parse(text: &str) -> ParsedPaste {
    PasteParser::default().parse(text)
}
