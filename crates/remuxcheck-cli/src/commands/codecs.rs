//! Codecs command implementation
//!
//! Prints the codec table in effect.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use remuxcheck_paste::CodecTable;
use std::fmt::Write;
use std::path::Path;

/// Renders every video and audio codec with its filename token and extension.
pub fn render_codecs(codecs: &CodecTable) -> String {
    let mut out = String::new();
    for (heading, table) in [("Video", &codecs.video), ("Audio", &codecs.audio)] {
        let _ = writeln!(out, "{}", heading.cyan().bold());
        for (name, token) in table {
            let extension = codecs.extension(name).unwrap_or("-");
            let atmos = if codecs.is_atmos(name) { " (Atmos)" } else { "" };
            let _ = writeln!(out, "  {:<36} {:<12} {}{}", name, token, extension, atmos);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", "Scan types".cyan().bold());
    for (scan_type, letter) in &codecs.scan_types {
        let _ = writeln!(out, "  {:<36} {}", scan_type, letter);
    }
    out
}

/// Run the codecs command.
pub fn run(config: Option<&Path>, json: bool) -> Result<()> {
    let config = AppConfig::load_or_default(config).context("Failed to load config")?;
    let codecs = &config.check.codecs;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(codecs).context("Failed to serialize codec table")?
        );
    } else {
        print!("{}", render_codecs(codecs));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_table() {
        colored::control::set_override(false);

        let text = render_codecs(&CodecTable::default());
        assert!(text.starts_with("Video\n"));
        assert!(text.contains("DTS-HD Master Audio"));
        assert!(text.contains("Scan types"));
    }

    #[test]
    fn test_override_from_config() {
        let config = AppConfig::parse(
            "[check.codecs]\nvideo = { \"MPEG-4 AVC Video\" = \"H.264\" }\n",
            "inline",
        )
        .unwrap();
        assert_eq!(
            config.check.codecs.video_token("MPEG-4 AVC Video"),
            Some("H.264")
        );
        assert!(config.check.codecs.video.len() == 1);
    }
}
