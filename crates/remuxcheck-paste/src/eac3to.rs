//! eac3to extraction logs.
//!
//! The logs are kept verbatim. Only two questions are ever asked of them:
//! was a track downmixed with `-mono`, and were chapters extracted.

use serde::{Deserialize, Serialize};

/// One log block, from its `eac3to v...` banner up to (not including) `Done.`.
pub type Eac3toLog = Vec<String>;

/// All eac3to logs found in a paste, in paste order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Eac3toLogSet {
    logs: Vec<Eac3toLog>,
}

impl Eac3toLogSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new log block.
    pub fn start_log(&mut self, first_line: impl Into<String>) {
        self.logs.push(vec![first_line.into()]);
    }

    /// Appends a line to the current block. Lines outside a block are dropped.
    pub fn push_line(&mut self, line: impl Into<String>) {
        if let Some(log) = self.logs.last_mut() {
            log.push(line.into());
        }
    }

    /// Returns the log blocks.
    pub fn logs(&self) -> &[Eac3toLog] {
        &self.logs
    }

    /// Number of log blocks.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    /// Returns true if no log was captured.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().flatten().map(String::as_str)
    }

    /// Returns true if any `command line:` passes a bare `-mono` argument.
    pub fn has_mono_flag(&self) -> bool {
        self.lines().any(|line| {
            let line = line.trim().to_lowercase();
            line.starts_with("command line:") && line.split_whitespace().any(|arg| arg == "-mono")
        })
    }

    /// Returns true if any line mentions chapters.
    pub fn mentions_chapters(&self) -> bool {
        self.lines().any(|line| line.to_lowercase().contains("chapters"))
    }
}

impl From<Vec<Eac3toLog>> for Eac3toLogSet {
    fn from(logs: Vec<Eac3toLog>) -> Self {
        Self { logs }
    }
}
