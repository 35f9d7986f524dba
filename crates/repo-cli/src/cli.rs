//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Repository Sync - Pin working copies to a ref of a remote git repository
#[derive(Parser, Debug)]
#[command(name = "repo-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Git executable to run instead of the one found on PATH
    #[arg(long, global = true, env = "REPO_SYNC_GIT")]
    pub git: Option<PathBuf>,

    /// Retry a failed synchronization this many times with backoff
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Clone or update one working copy
    ///
    /// Clones URL into LOCATION when it does not exist yet. When LOCATION
    /// already holds a repository, `origin` is re-pointed at URL, fetched,
    /// and REF is checked out (fast-forwarding it when REF is a branch).
    ///
    /// Examples:
    ///   repo-sync sync ./jobs https://example.com/jobs.git main
    ///   repo-sync sync ./jobs https://example.com/jobs.git ce5a422
    Sync {
        /// Directory holding (or to hold) the working copy
        location: PathBuf,

        /// Remote repository URL
        url: String,

        /// Branch, tag, or commit to land on
        #[arg(value_name = "REF")]
        reference: String,
    },

    /// Synchronize every repository listed in a manifest
    ///
    /// The manifest is TOML, JSON, or YAML, chosen by file extension.
    /// Every entry is attempted; the exit status is non-zero if any failed.
    Apply {
        /// Path to the manifest file
        manifest: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   repo-sync completions bash > ~/.local/share/bash-completion/completions/repo-sync
    ///   repo-sync completions zsh > ~/.zfunc/_repo-sync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
