//! Subcommand implementations.

pub mod check;
pub mod codecs;
pub mod parse;
pub mod reporting;
pub mod rules;
