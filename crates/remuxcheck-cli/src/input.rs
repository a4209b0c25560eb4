//! Paste input loading.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Path argument meaning standard input.
pub const STDIN: &str = "-";

/// Reads the paste text from `input`, or from stdin when it is `-`.
pub fn read_paste(input: &str) -> Result<String> {
    if input == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read paste from stdin")?;
        return Ok(text);
    }

    let path = Path::new(input);
    std::fs::read_to_string(path).with_context(|| format!("Failed to read paste: {}", path.display()))
}
