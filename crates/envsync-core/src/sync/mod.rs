//! Reconciliation
//!
//! - **reconciler**: additive local sync between two mappings or env files
//! - **remote_state**: pull, push and diff against a [`crate::KeyValueStore`]

mod reconciler;
mod remote_state;

pub use reconciler::{Reconciler, SyncResult, TARGET_LABEL};
pub use remote_state::{LOCAL_LABEL, PushOptions, RemoteState, RemoteSyncResult};
