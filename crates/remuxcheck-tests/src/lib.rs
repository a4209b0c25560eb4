//! remuxcheck End-to-End Test Infrastructure
//!
//! Integration tests run whole pastes through parsing and validation:
//!
//! - Pipeline: raw paste -> parsed records -> sectioned report
//! - Scenarios: conversion, ordering and chapter cases on realistic pastes
//! - Containment: a failing rule never blanks the rest of the report
//! - Properties: parser and normalizer invariants under proptest
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p remuxcheck-tests
//! ```

pub mod fixtures;

pub use fixtures::{heat_paste, messages, validate, validate_with, PasteBuilder};
