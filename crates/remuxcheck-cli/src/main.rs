//! remuxcheck CLI - checks BDInfo / MediaInfo pastes against remux conventions

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use remuxcheck_cli::commands::{self, check::CheckOptions};
use remuxcheck_cli::logging;

/// remuxcheck - Remux paste validator
#[derive(Parser)]
#[command(name = "remuxcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file ([paste], [check] and [services] sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a paste and print the report
    Check {
        /// Paste file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Calling context; internal channels get internal release naming
        #[arg(long)]
        channel: Option<String>,

        /// Output the report as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Rule IDs to disable (can be repeated)
        #[arg(long = "disable-rule")]
        disable_rules: Vec<String>,

        /// Only run these rules (comma-separated)
        #[arg(long)]
        only: Option<String>,
    },

    /// Print the parsed structure of a paste as JSON
    Parse {
        /// Paste file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the validation rules in execution order
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Rule IDs to mark disabled (can be repeated)
        #[arg(long = "disable-rule")]
        disable_rules: Vec<String>,

        /// Only enable these rules (comma-separated)
        #[arg(long)]
        only: Option<String>,
    },

    /// Print the codec table in effect
    Codecs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check {
            input,
            channel,
            json,
            disable_rules,
            only,
        } => commands::check::run(CheckOptions {
            input: &input,
            config,
            channel: channel.as_deref(),
            json,
            disable_rules: &disable_rules,
            only_rules: only.as_deref(),
        }),
        Commands::Parse { input, pretty } => {
            commands::parse::run(&input, config, pretty).map(|()| ExitCode::SUCCESS)
        }
        Commands::Rules {
            json,
            disable_rules,
            only,
        } => commands::rules::run(json, &disable_rules, only.as_deref()).map(|()| ExitCode::SUCCESS),
        Commands::Codecs { json } => {
            commands::codecs::run(config, json).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
