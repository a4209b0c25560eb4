//! Human-readable report rendering.

use colored::{ColoredString, Colorize};
use remuxcheck_lint::{ReportEntry, Severity, Tally, ValidationReport};
use std::fmt::Write;

fn tag(severity: Severity) -> ColoredString {
    let tag = format!("[{}]", severity.tag());
    match severity {
        Severity::Correct => tag.green(),
        Severity::Warning => tag.yellow(),
        Severity::Error => tag.red(),
        Severity::Info => tag.blue(),
        Severity::Fail => tag.red().bold(),
    }
}

fn render_entry(out: &mut String, entry: &ReportEntry) {
    let _ = writeln!(out, "{} {}", tag(entry.severity), entry.message);
    if let Some(detail) = entry.detail.as_deref() {
        for line in detail.lines() {
            let _ = writeln!(out, "    {}", line.dimmed());
        }
    }
}

/// `N correct, N warning(s), N error(s), and N info`.
pub fn tally_line(tally: &Tally) -> String {
    format!(
        "{} correct, {} warning{}, {} error{}, and {} info",
        tally.correct,
        tally.warning,
        if tally.warning == 1 { "" } else { "s" },
        tally.error,
        if tally.error == 1 { "" } else { "s" },
        tally.info
    )
}

/// Renders the report: one heading per section, then the tally line.
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for section in &report.sections {
        let _ = writeln!(out, "{}", section.section.title().cyan().bold());
        for entry in &section.entries {
            render_entry(&mut out, entry);
        }
        out.push('\n');
    }

    let summary = tally_line(&report.tally);
    let summary = if report.has_errors() {
        summary.red().bold()
    } else {
        summary.green().bold()
    };
    let _ = writeln!(out, "{}", summary);
    out
}
