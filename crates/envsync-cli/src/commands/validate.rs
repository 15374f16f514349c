//! Validate command implementation

use envsync_core::{ValidationResult, Validator};

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output;

/// Validate `file` against the configured schema and rules.
///
/// Returns [`CliError::ValidationFailed`] after printing the report when the
/// file is invalid.
pub fn run_validate(ctx: &Context, file: &str) -> Result<()> {
    let result = validate(ctx, file)?;

    if ctx.json() {
        output::print_json(&result)?;
    } else {
        print!("{}", output::render_validation(&result));
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::ValidationFailed)
    }
}

pub fn validate(ctx: &Context, file: &str) -> Result<ValidationResult> {
    let vars = ctx.read_env(file)?;
    let config = ctx.config();
    let validator = Validator::with_rules(config.schema.clone(), config.rules.clone())?;

    let result = validator.validate(&vars);
    tracing::debug!(
        file,
        valid = result.valid,
        errors = result.errors.len(),
        "Validated env file"
    );
    Ok(result)
}
