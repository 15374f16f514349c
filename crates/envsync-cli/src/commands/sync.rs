//! Sync command implementation
//!
//! Fills variables missing from a target file using the layered defaults.

use envsync_core::{Reconciler, SyncResult};

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output;

/// Run the sync command
pub fn run_sync(ctx: &Context, source: &str, target: &str, dry_run: bool) -> Result<()> {
    let result = sync_files(ctx, source, target, dry_run)?;

    if ctx.json() {
        output::print_json(&result)?;
    } else {
        print!("{}", output::render_sync(&result, dry_run));
    }
    Ok(())
}

pub fn sync_files(ctx: &Context, source: &str, target: &str, dry_run: bool) -> Result<SyncResult> {
    let source_path = ctx.resolve_path(source);
    let target_path = ctx.resolve_path(target);
    if source_path == target_path {
        return Err(CliError::user(format!(
            "source and target are the same file: {}",
            source
        )));
    }

    let reconciler = Reconciler::new(ctx.config())?;
    let mut result = reconciler.sync_files(&source_path, &target_path, dry_run)?;
    result.file_path = target.to_string();
    Ok(result)
}
