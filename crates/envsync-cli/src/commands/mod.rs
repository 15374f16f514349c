//! Command implementations for envsync-cli

pub mod adapters;
pub mod diff;
pub mod remote;
pub mod sync;
pub mod validate;

pub use adapters::run_adapters;
pub use diff::run_diff;
pub use remote::{run_pull, run_push, run_remote_diff};
pub use sync::run_sync;
pub use validate::run_validate;
