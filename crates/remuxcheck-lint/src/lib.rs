//! Remux convention checks.
//!
//! Runs a catalogue of rules over a parsed paste (BDInfo, MediaInfo and
//! eac3to logs) and collects tagged findings into a sectioned report.
//!
//! # Example
//!
//! ```no_run
//! use remuxcheck_lint::Validator;
//! use remuxcheck_paste::paste;
//!
//! let text = std::fs::read_to_string("paste.txt").unwrap();
//! let report = Validator::new().validate(&paste::parse(&text), None);
//!
//! for entry in report.entries() {
//!     println!("[{}] {}", entry.severity, entry.message);
//! }
//! if report.has_errors() {
//!     eprintln!("{} error(s)", report.tally.error);
//! }
//! ```

pub mod config;
pub mod diff;
pub mod engine;
pub mod registry;
pub mod report;
pub mod rules;
pub mod services;

pub use config::CheckConfig;
pub use engine::Validator;
pub use registry::{RuleMetadata, RuleRegistry};
pub use report::{ReportEntry, RuleSection, SectionReport, Severity, Tally, ValidationReport};
pub use rules::{CheckContext, CheckRule, RuleFailure};
pub use services::{ServiceError, Services};
