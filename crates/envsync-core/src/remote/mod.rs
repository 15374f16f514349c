//! Remote key-value stores
//!
//! [`KeyValueStore`] is the only thing remote reconciliation needs from a
//! backend. Concrete stores are created by name through an
//! [`AdapterRegistry`]; `file` and `memory` ship with the crate.

mod file;
mod memory;
mod registry;
mod store;

pub use file::{DEFAULT_STORE_PATH, FILE_ADAPTER, FileStore};
pub use memory::{MEMORY_ADAPTER, MemoryStore, StoreCall};
pub use registry::{AdapterFactory, AdapterRegistry};
pub use store::{KeyValueStore, key_from_parameter, normalize_prefix, parameter_name, remote_label};
