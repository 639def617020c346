//! Binary entry point for casefinder.
//!
//! This binary provides the CLI interface for the case search engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use casefinder::cli::{self, BracketsOutputFormat, SearchArgs};
use casefinder::config::{CONFIG_PATH_ENV, CasefinderConfig};
use casefinder::observability;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Casefinder - search and filter missing-person case records.
#[derive(Parser)]
#[command(name = "casefinder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Search case records.
    Search(SearchArgs),

    /// List accepted filter values.
    Brackets {
        /// Output format.
        #[arg(short, long, value_enum, default_value = "table")]
        format: BracketsOutputFormat,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(
    command: Commands,
    config: &CasefinderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Search(args) => cli::cmd_search(&args, config)?,
        Commands::Brackets { format } => cli::cmd_brackets(&mut io::stdout().lock(), format)?,
        Commands::Config { show } => cli::cmd_config(&mut io::stdout().lock(), config, show)?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "casefinder", &mut io::stdout());
        },
    }
    Ok(())
}

/// Loads configuration.
fn load_config(path: Option<&Path>) -> casefinder::Result<CasefinderConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return CasefinderConfig::load_from_file(config_path);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV)
        && !config_path.trim().is_empty()
    {
        return CasefinderConfig::load_from_file(Path::new(&config_path));
    }

    // Otherwise, load from default location
    Ok(CasefinderConfig::load_default())
}
