//! Check rule trait and per-section rule modules.

use crate::config::CheckConfig;
use crate::report::{ReportEntry, RuleSection};
use crate::services::{ServiceError, Services};
use remuxcheck_paste::{BdInfoReport, CodecTable, Eac3toLogSet, MediaInfoReport, SourceKind};

pub mod audio;
pub mod chapters;
#[cfg(test)]
pub(crate) mod fixture;
mod helpers;
pub mod metadata;
pub mod text;
pub mod video;

/// Everything a rule may look at during one validation pass.
///
/// Borrowed for the duration of the pass; rules never mutate it.
pub struct CheckContext<'a> {
    pub bdinfo: &'a BdInfoReport,
    pub mediainfo: &'a MediaInfoReport,
    pub eac3to: &'a Eac3toLogSet,
    /// Calling context (e.g. a chat channel), decides internal vs external naming.
    pub channel: Option<&'a str>,
    pub config: &'a CheckConfig,
    pub services: &'a Services,
    pub source: SourceKind,
}

impl<'a> CheckContext<'a> {
    /// Codec table in effect for this pass.
    pub fn codecs(&self) -> &'a CodecTable {
        &self.config.codecs
    }

    /// Returns true if the calling context is an internal channel.
    pub fn is_internal(&self) -> bool {
        self.config.is_internal(self.channel)
    }
}

/// A conformance rule run against one paste.
pub trait CheckRule: Send + Sync {
    /// Unique identifier (e.g., "metadata/filename", "audio/conversions").
    fn id(&self) -> &'static str;

    /// Report section the rule's entries appear under.
    fn section(&self) -> RuleSection;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Message of the `fail` entry emitted when the rule cannot run.
    fn failure_message(&self) -> &'static str;

    /// Runs the rule.
    ///
    /// Returning `Err` (or panicking) yields a single `fail` entry; the
    /// remaining rules still run.
    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure>;
}

/// Reasons a rule could not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum RuleFailure {
    /// A value the rule depends on is absent.
    #[error("missing {0}")]
    Missing(String),

    /// A value is present but not in the expected shape.
    #[error("malformed {field}: `{value}`")]
    Malformed { field: String, value: String },

    /// An external service failed in a way the rule does not degrade.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl RuleFailure {
    pub fn missing(what: impl Into<String>) -> Self {
        RuleFailure::Missing(what.into())
    }

    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        RuleFailure::Malformed {
            field: field.into(),
            value: value.into(),
        }
    }
}
