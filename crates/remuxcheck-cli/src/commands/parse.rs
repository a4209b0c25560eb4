//! Parse command implementation
//!
//! Prints the structured view of a paste as JSON.

use crate::config::AppConfig;
use crate::input::read_paste;
use anyhow::{Context, Result};
use remuxcheck_paste::{mediainfo, MediaInfoReport, ParsedPaste, PasteParser, SourceKind};
use serde::Serialize;
use std::path::Path;

/// JSON output for the parse command.
#[derive(Debug, Serialize)]
pub struct ParseOutput {
    pub source: SourceKind,
    pub paste: ParsedPaste,
    /// The MediaInfo lines as typed records.
    pub mediainfo: MediaInfoReport,
}

/// Parses paste `text` under `config`.
pub fn parse_text(text: &str, config: &AppConfig) -> ParseOutput {
    let parser = PasteParser::new(config.paste.clone()).with_codecs(config.check.codecs.clone());
    let paste = parser.parse(text);
    let mediainfo = mediainfo::parse(&paste.mediainfo);
    let source = SourceKind::detect(&paste.bdinfo, &mediainfo);
    ParseOutput {
        source,
        paste,
        mediainfo,
    }
}

/// Run the parse command.
pub fn run(input: &str, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = AppConfig::load_or_default(config).context("Failed to load config")?;
    let text = read_paste(input)?;
    let output = parse_text(&text, &config);

    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize parsed paste")?;
    println!("{}", json);
    Ok(())
}
