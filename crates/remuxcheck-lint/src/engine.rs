//! One-call validation of a paste.

use crate::config::CheckConfig;
use crate::registry::RuleRegistry;
use crate::report::ValidationReport;
use crate::rules::CheckContext;
use crate::services::Services;
use remuxcheck_paste::{mediainfo, ParsedPaste, PasteParser, SourceKind};
use tracing::debug;

/// Rule registry, policy and services bundled for repeated validations.
///
/// Every call builds its own context and report, so one validator can check
/// any number of pastes.
pub struct Validator {
    registry: RuleRegistry,
    config: CheckConfig,
    services: Services,
}

impl Validator {
    /// Creates a validator with every rule, the default policy and offline services.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::default_rules(),
            config: CheckConfig::default(),
            services: Services::offline(),
        }
    }

    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
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

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Validates an already parsed paste.
    ///
    /// `channel` names the calling context; internal channels get the
    /// internal filename rules.
    pub fn validate(&self, paste: &ParsedPaste, channel: Option<&str>) -> ValidationReport {
        let mediainfo = mediainfo::parse(&paste.mediainfo);
        let source = SourceKind::detect(&paste.bdinfo, &mediainfo);
        debug!(?source, audio = mediainfo.audio.len(), text = mediainfo.text.len(), "validating paste");

        let ctx = CheckContext {
            bdinfo: &paste.bdinfo,
            mediainfo: &mediainfo,
            eac3to: &paste.eac3to,
            channel,
            config: &self.config,
            services: &self.services,
            source,
        };
        self.registry.run(&ctx)
    }

    /// Parses `text` with `parser` and validates the result.
    pub fn validate_text(
        &self,
        parser: &PasteParser,
        text: &str,
        channel: Option<&str>,
    ) -> ValidationReport {
        let paste = parser.parse(text);
        self.validate(&paste, channel)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
