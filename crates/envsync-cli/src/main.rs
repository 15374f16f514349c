//! envsync CLI
//!
//! Validates, compares and reconciles `.env` files, locally and against a
//! remote parameter store.

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use envsync_core::{AdapterRegistry, PushOptions};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let ctx = Context::load(&cwd, cli.config.as_deref(), cli.json)?;
    let registry = AdapterRegistry::with_builtins();

    execute_command(&ctx, &registry, cli.command)
}

/// Log to stderr so `--json` output on stdout stays parseable.
///
/// `RUST_LOG` wins; otherwise `debug` with `--verbose` and `warn` without.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(ctx: &Context, registry: &AdapterRegistry, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Validate { file } => commands::run_validate(ctx, &file),
        Commands::Diff { source, target } => commands::run_diff(ctx, &source, &target),
        Commands::Sync {
            source,
            target,
            dry_run,
        } => commands::run_sync(ctx, &source, &target, dry_run),
        Commands::Pull {
            target,
            prefix,
            dry_run,
        } => commands::run_pull(ctx, registry, &target, &prefix, dry_run),
        Commands::Push {
            source,
            prefix,
            dry_run,
            prune,
        } => commands::run_push(
            ctx,
            registry,
            &source,
            &prefix,
            PushOptions { dry_run, prune },
        ),
        Commands::RemoteDiff { local, prefix } => {
            commands::run_remote_diff(ctx, registry, &local, &prefix)
        }
        Commands::Adapters => commands::run_adapters(ctx, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use envsync_test_utils::TestProject;

    #[test]
    fn test_cli_error_user() {
        let error = CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_execute_sync_command() {
        let project = TestProject::new();
        project.write_env(".env.example", &[("A", "1")]);
        let ctx = Context::load(project.root(), None, false).unwrap();

        let cmd = Commands::Sync {
            source: ".env.example".into(),
            target: ".env".into(),
            dry_run: false,
        };
        execute_command(&ctx, &AdapterRegistry::with_builtins(), cmd).unwrap();

        project.assert_env_line(".env", "A", "1");
    }

    #[test]
    fn test_execute_adapters_command() {
        let project = TestProject::new();
        let ctx = Context::load(project.root(), None, true).unwrap();

        assert!(execute_command(&ctx, &AdapterRegistry::with_builtins(), Commands::Adapters).is_ok());
    }
}
