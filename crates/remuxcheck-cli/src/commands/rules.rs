//! Rules command implementation
//!
//! Lists the rule catalogue.

use super::check::build_registry;
use anyhow::{Context, Result};
use colored::Colorize;
use remuxcheck_lint::{RuleMetadata, RuleSection};
use std::fmt::Write;

/// Renders the catalogue grouped by section heading, in execution order.
pub fn render_rules(rules: &[RuleMetadata]) -> String {
    let mut out = String::new();
    let mut current: Option<RuleSection> = None;
    for rule in rules {
        if current != Some(rule.section) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", rule.section.title().cyan().bold());
            current = Some(rule.section);
        }
        let id = if rule.enabled {
            rule.id.normal()
        } else {
            rule.id.dimmed().strikethrough()
        };
        let _ = writeln!(out, "  {:<32} {}", id, rule.description);
    }
    out
}

/// Run the rules command.
pub fn run(json: bool, disable_rules: &[String], only_rules: Option<&str>) -> Result<()> {
    let rules = build_registry(disable_rules, only_rules).rule_metadata();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rules).context("Failed to serialize rules")?
        );
    } else {
        print!("{}", render_rules(&rules));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rules_groups_sections() {
        colored::control::set_override(false);

        let rules = build_registry(&[], None).rule_metadata();
        assert_eq!(rules.len(), 21);

        let text = render_rules(&rules);
        let headings: Vec<_> = text
            .lines()
            .filter(|l| !l.is_empty() && !l.starts_with(' '))
            .collect();
        assert_eq!(
            headings,
            vec!["Metadata", "Video & Audio Tracks", "Text Tracks", "Chapters"]
        );
        assert!(text.contains("metadata/movie-name-format"));
        assert!(text.contains("chapters/padding"));
    }
}
