//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// envsync - Keep .env files consistent with each other and a remote store
#[derive(Parser, Debug)]
#[command(name = "envsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .envsync.yaml, .envsync.yml or .envsync.toml)
    #[arg(short, long, global = true, env = "ENVSYNC_CONFIG")]
    pub config: Option<String>,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate an env file against the schema
    ///
    /// Exits with status 1 when the file is invalid.
    Validate {
        /// Env file to validate
        #[arg(default_value = ".env")]
        file: String,
    },

    /// Compare two env files
    ///
    /// Examples:
    ///   envsync diff .env.example .env
    Diff {
        /// Reference file
        source: String,
        /// File compared against the reference
        target: String,
    },

    /// Add variables missing from the target file
    ///
    /// Existing values in the target are never changed. Missing values come
    /// from config defaults, then schema defaults, then the source file.
    Sync {
        /// Reference file
        source: String,
        /// File to fill
        target: String,
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Pull variables from the remote store into a local file
    Pull {
        /// Local file to update
        #[arg(default_value = ".env")]
        target: String,
        /// Parameter prefix in the store
        #[arg(short, long, default_value = "/")]
        prefix: String,
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Push variables from a local file to the remote store
    Push {
        /// Local file to push
        source: String,
        /// Parameter prefix in the store
        #[arg(short, long, default_value = "/")]
        prefix: String,
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
        /// Delete remote variables the local file does not have
        #[arg(long)]
        prune: bool,
    },

    /// Compare a local file with the remote store
    RemoteDiff {
        /// Local file
        #[arg(default_value = ".env")]
        local: String,
        /// Parameter prefix in the store
        #[arg(short, long, default_value = "/")]
        prefix: String,
    },

    /// List available store adapters
    Adapters,
}
