//! mkvtoolnix version rule.

use crate::report::{ReportEntry, RuleSection};
use crate::rules::{CheckContext, CheckRule, RuleFailure};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

static VERSION_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static MEDIAINFO_NAME_RE: OnceLock<Regex> = OnceLock::new();
static RELEASE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn version_number_regex() -> &'static Regex {
    VERSION_NUMBER_RE
        .get_or_init(|| Regex::new(r"(\d+\.\d+(\.\d+)?)").expect("invalid regex pattern"))
}

/// `mkvmerge v57.0.0 ('Till The End') 64-bit`
fn mediainfo_name_regex() -> &'static Regex {
    MEDIAINFO_NAME_RE.get_or_init(|| Regex::new(r"'(.*)'").expect("invalid regex pattern"))
}

/// `Version 57.0.0 "Till The End" 2021-05-22`
fn release_name_regex() -> &'static Regex {
    RELEASE_NAME_RE.get_or_init(|| Regex::new(r#""(.*)""#).expect("invalid regex pattern"))
}

/// Version number and code name of an mkvtoolnix build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MkvtoolnixVersion {
    pub number: String,
    pub name: String,
}

impl MkvtoolnixVersion {
    fn parse(line: &str, name_regex: &Regex) -> Option<Self> {
        let number = version_number_regex().captures(line)?.get(1)?.as_str();
        let name = name_regex.captures(line)?.get(1)?.as_str();
        Some(Self {
            number: number.to_string(),
            name: name.to_string(),
        })
    }

    /// Parses a MediaInfo writing application.
    pub fn from_writing_application(value: &str) -> Option<Self> {
        Self::parse(value, mediainfo_name_regex())
    }

    /// Parses an mkvtoolnix release line.
    pub fn from_release_line(line: &str) -> Option<Self> {
        Self::parse(line, release_name_regex())
    }
}

impl std::fmt::Display for MkvtoolnixVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\"", self.number, self.name)
    }
}

/// Rule: metadata/mkvtoolnix-version
/// The file was muxed with the latest mkvtoolnix release.
pub struct MkvtoolnixVersionRule;

impl CheckRule for MkvtoolnixVersionRule {
    fn id(&self) -> &'static str {
        "metadata/mkvtoolnix-version"
    }

    fn section(&self) -> RuleSection {
        RuleSection::Metadata
    }

    fn description(&self) -> &'static str {
        "Muxed with the latest mkvtoolnix"
    }

    fn failure_message(&self) -> &'static str {
        "Error checking mkvtoolnix version"
    }

    fn check(&self, ctx: &CheckContext) -> Result<Vec<ReportEntry>, RuleFailure> {
        let used = ctx
            .mediainfo
            .general()
            .and_then(|g| g.writing_application.as_deref())
            .and_then(MkvtoolnixVersion::from_writing_application);
        let Some(used) = used else {
            return Ok(vec![ReportEntry::info("Not using mkvtoolnix")]);
        };

        let latest_line = match &ctx.config.mkvtoolnix_version_override {
            Some(line) => line.clone(),
            None => match ctx.services.versions.latest_version_line() {
                Ok(line) => line,
                Err(err) => {
                    warn!(error = %err, "could not fetch latest mkvtoolnix version");
                    return Ok(vec![ReportEntry::info(
                        "Could not fetch latest mkvtoolnix version",
                    )]);
                }
            },
        };
        let Some(latest) = MkvtoolnixVersion::from_release_line(&latest_line) else {
            warn!(line = %latest_line, "unrecognized mkvtoolnix release line");
            return Ok(vec![ReportEntry::info("Could not fetch latest mkvtoolnix version")]);
        };

        let entry = if used == latest {
            ReportEntry::correct(format!("Uses latest mkvtoolnix: `{}`", used))
        } else {
            ReportEntry::warning(format!(
                "Not using latest mkvtoolnix: `{}` latest is: `{}`",
                used, latest
            ))
        };
        Ok(vec![entry])
    }
}
