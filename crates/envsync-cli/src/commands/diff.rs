//! Diff command implementation
//!
//! Compares two env files without changing either.

use envsync_core::{DiffResult, compare};

use crate::context::Context;
use crate::error::Result;
use crate::output;

/// Run the diff command
pub fn run_diff(ctx: &Context, source: &str, target: &str) -> Result<()> {
    let diff = diff_files(ctx, source, target)?;

    if ctx.json() {
        output::print_json(&diff)?;
    } else {
        print!("{}", output::render_diff(&diff, source, target));
    }
    Ok(())
}

/// Compare the two files with ignored keys removed from both sides.
pub fn diff_files(ctx: &Context, source: &str, target: &str) -> Result<DiffResult> {
    let ignore = ctx.ignore_set()?;
    let source_vars = ignore.apply(&ctx.read_env(source)?);
    let target_vars = ignore.apply(&ctx.read_env(target)?);

    Ok(compare(&source_vars, &target_vars))
}
