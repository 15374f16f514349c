//! Adapters command implementation

use envsync_core::AdapterRegistry;

use crate::context::Context;
use crate::error::Result;
use crate::output;

/// List the adapters `registry` can create.
pub fn run_adapters(ctx: &Context, registry: &AdapterRegistry) -> Result<()> {
    let names = registry.list();
    if ctx.json() {
        output::print_json(&names)?;
    } else {
        print!("{}", output::render_adapters(&names));
    }
    Ok(())
}
