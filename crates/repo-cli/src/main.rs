//! Repository Sync CLI
//!
//! Pins local working copies to a ref of a remote git repository.

mod cli;
mod commands;
mod config;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.git.as_deref(), cli.retries),
        None => {
            println!("{} Repository Sync CLI", "repo-sync".green().bold());
            println!();
            println!("Run {} for available commands.", "repo-sync --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr. `--verbose` turns on debug output for every git call;
/// otherwise `RUST_LOG` decides, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if initialized.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(cmd: Commands, git: Option<&Path>, retries: u32) -> Result<()> {
    match cmd {
        Commands::Sync {
            location,
            url,
            reference,
        } => commands::run_sync(git, &location, &url, &reference, retries),
        Commands::Apply { manifest } => commands::run_apply(git, &manifest, retries),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
