//! Test fixture for running single rules.

use super::{CheckContext, CheckRule};
use crate::config::CheckConfig;
use crate::report::{ReportEntry, Severity};
use crate::services::Services;
use remuxcheck_paste::{
    mediainfo, paste, BdInfoReport, Eac3toLogSet, MediaInfoReport, SourceKind,
};

/// Owns everything a [`CheckContext`] borrows.
pub(crate) struct Fixture {
    pub bdinfo: BdInfoReport,
    pub mediainfo: MediaInfoReport,
    pub eac3to: Eac3toLogSet,
    pub channel: Option<String>,
    pub config: CheckConfig,
    pub services: Services,
    pub source: Option<SourceKind>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            bdinfo: BdInfoReport::default(),
            mediainfo: MediaInfoReport::default(),
            eac3to: Eac3toLogSet::default(),
            channel: None,
            config: CheckConfig::default(),
            services: Services::offline(),
            source: None,
        }
    }

    /// Parses a whole paste: BDInfo, MediaInfo and eac3to logs.
    pub fn from_paste(text: &str) -> Self {
        let parsed = paste::parse(text);
        Self {
            bdinfo: parsed.bdinfo,
            mediainfo: mediainfo::parse(&parsed.mediainfo),
            eac3to: parsed.eac3to,
            ..Self::new()
        }
    }

    /// Parses a MediaInfo report only.
    pub fn from_mediainfo(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        Self {
            mediainfo: mediainfo::parse(&lines),
            ..Self::new()
        }
    }

    pub fn with_bdinfo_video(mut self, video: &str) -> Self {
        self.bdinfo.video = vec![video.to_string()];
        self
    }

    pub fn with_bdinfo_audio(mut self, names: &[&str]) -> Self {
        self.bdinfo.audio = names
            .iter()
            .map(|n| remuxcheck_paste::BdAudioTrack::new(*n, Some("English".to_string())))
            .collect();
        self
    }

    pub fn with_eac3to(mut self, lines: &[&str]) -> Self {
        self.eac3to = Eac3toLogSet::from(vec![lines.iter().map(|l| l.to_string()).collect()]);
        self
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = Some(source);
        self
    }

    pub fn ctx(&self) -> CheckContext<'_> {
        CheckContext {
            bdinfo: &self.bdinfo,
            mediainfo: &self.mediainfo,
            eac3to: &self.eac3to,
            channel: self.channel.as_deref(),
            config: &self.config,
            services: &self.services,
            source: self
                .source
                .unwrap_or_else(|| SourceKind::detect(&self.bdinfo, &self.mediainfo)),
        }
    }

    /// Runs one rule, panicking if it fails.
    pub fn run(&self, rule: &dyn CheckRule) -> Vec<ReportEntry> {
        match rule.check(&self.ctx()) {
            Ok(entries) => entries,
            Err(failure) => panic!("{} failed: {}", rule.id(), failure),
        }
    }
}

/// `(severity, message)` pairs, for compact assertions.
pub(crate) fn summary(entries: &[ReportEntry]) -> Vec<(Severity, String)> {
    entries
        .iter()
        .map(|e| (e.severity, e.message.clone()))
        .collect()
}
