//! scss-lint CLI tool.
//!
//! Usage:
//! ```bash
//! scss-lint check [OPTIONS] [PATHS]...
//! scss-lint list-rules
//! scss-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use scss_lint_core::EXIT_INTERNAL_ERROR;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter and formatter for SCSS stylesheets
#[derive(Parser)]
#[command(name = "scss-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCSS_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Files or directories to check (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Rewrite files with automatic fixes applied
        #[arg(long)]
        fix: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(EXIT_INTERNAL_ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            paths,
            fix,
            format,
            rules,
            exclude,
        } => commands::check::run(
            &commands::check::CheckArgs {
                paths,
                fix,
                format,
                rules,
                exclude,
            },
            cli.config.as_deref(),
        ),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(scss_lint_core::EXIT_SUCCESS)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(scss_lint_core::EXIT_SUCCESS)
        }
    }
}
