//! Pull, push and remote-diff command implementations

use envsync_core::remote::remote_label;
use envsync_core::{AdapterRegistry, PushOptions, RemoteSyncResult};

use crate::context::Context;
use crate::error::Result;
use crate::output;

/// Pull remote variables into `target`.
pub fn run_pull(
    ctx: &Context,
    registry: &AdapterRegistry,
    target: &str,
    prefix: &str,
    dry_run: bool,
) -> Result<()> {
    let state = ctx.remote_state(registry)?;
    let mut result = state.pull_file(prefix, &ctx.resolve_path(target), dry_run)?;
    result.target = target.to_string();

    print_result(ctx, &result, dry_run)
}

/// Push `source` to the remote store.
pub fn run_push(
    ctx: &Context,
    registry: &AdapterRegistry,
    source: &str,
    prefix: &str,
    options: PushOptions,
) -> Result<()> {
    let state = ctx.remote_state(registry)?;
    let mut result = state.push_file(&ctx.resolve_path(source), prefix, &options)?;
    result.source = source.to_string();

    print_result(ctx, &result, options.dry_run)
}

/// Compare `local` with the remote store.
pub fn run_remote_diff(
    ctx: &Context,
    registry: &AdapterRegistry,
    local: &str,
    prefix: &str,
) -> Result<()> {
    let state = ctx.remote_state(registry)?;
    let diff = state.diff_file(&ctx.resolve_path(local), prefix)?;

    if ctx.json() {
        output::print_json(&diff)?;
    } else {
        let remote = remote_label(state.store(), prefix);
        print!("{}", output::render_diff(&diff, local, &remote));
    }
    Ok(())
}

fn print_result(ctx: &Context, result: &RemoteSyncResult, dry_run: bool) -> Result<()> {
    if ctx.json() {
        output::print_json(result)?;
    } else {
        print!("{}", output::render_remote_sync(result, dry_run));
    }
    Ok(())
}
