//! remuxcheck CLI library.
//!
//! Configuration loading, input handling and the subcommands behind the
//! `remuxcheck` binary.

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
