//! Check command implementation
//!
//! Parses a paste and runs the validation rules over it.

use super::reporting::render_report;
use crate::config::AppConfig;
use crate::input::read_paste;
use anyhow::{Context, Result};
use remuxcheck_lint::{RuleRegistry, ValidationReport, Validator};
use remuxcheck_paste::PasteParser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

/// Options of one `check` invocation.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions<'a> {
    pub input: &'a str,
    pub config: Option<&'a Path>,
    /// Calling context, decides internal vs external naming.
    pub channel: Option<&'a str>,
    pub json: bool,
    pub disable_rules: &'a [String],
    /// Comma separated rule ids.
    pub only_rules: Option<&'a str>,
}

/// JSON output for the check command.
#[derive(Debug, Serialize)]
pub struct CheckOutput<'a> {
    /// No errors and no failed rules.
    pub success: bool,
    pub input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<&'a str>,
    pub report: &'a ValidationReport,
}

/// Builds the registry with the rule selection applied.
pub fn build_registry(disable_rules: &[String], only_rules: Option<&str>) -> RuleRegistry {
    let mut registry = RuleRegistry::default_rules();
    for rule_id in disable_rules {
        registry.disable_rule(rule_id);
    }
    if let Some(only) = only_rules {
        let rules: Vec<&str> = only.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        registry.enable_only(&rules);
    }
    registry
}

/// Validates paste `text` under `config`.
pub fn check_text(
    text: &str,
    config: &AppConfig,
    registry: RuleRegistry,
    channel: Option<&str>,
) -> Result<ValidationReport> {
    let services = config.services().context("Failed to set up services")?;
    let parser = PasteParser::new(config.paste.clone()).with_codecs(config.check.codecs.clone());
    let validator = Validator::new()
        .with_registry(registry)
        .with_config(config.check.clone())
        .with_services(services);
    Ok(validator.validate_text(&parser, text, channel))
}

/// Run the check command.
///
/// # Returns
/// Exit code: 0 if the paste passed, 1 on errors or failed rules
pub fn run(options: CheckOptions) -> Result<ExitCode> {
    let config = AppConfig::load_or_default(options.config).with_context(|| {
        format!(
            "Failed to load config: {}",
            options.config.map(|p| p.display().to_string()).unwrap_or_default()
        )
    })?;
    let text = read_paste(options.input)?;
    let registry = build_registry(options.disable_rules, options.only_rules);
    debug!(rules = registry.len(), input = options.input, "checking paste");

    let report = check_text(&text, &config, registry, options.channel)?;
    let success = !report.has_errors() && report.failure_count() == 0;

    if options.json {
        let output = CheckOutput {
            success,
            input: options.input,
            channel: options.channel,
            report: &report,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?
        );
    } else {
        print!("{}", render_report(&report));
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
