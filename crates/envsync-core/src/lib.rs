//! Core engine for envsync
//!
//! This crate keeps `.env` mappings consistent with each other and with a
//! remote parameter store:
//!
//! - **Diff**: four-way comparison of two mappings ([`compare`])
//! - **Validation**: typed schema checks with required/pattern rules ([`Validator`])
//! - **Local reconcile**: additive fill of missing keys with layered defaults ([`Reconciler`])
//! - **Remote reconcile**: pull, push and diff against a [`KeyValueStore`] ([`RemoteState`])
//! - **Adapters**: explicit name-to-factory [`AdapterRegistry`]
//!
//! # Architecture
//!
//! ```text
//!                 envsync-cli
//!                      |
//!                envsync-core
//!        +--------+----+----+--------+
//!        |        |         |        |
//!      diff   validator   sync    remote
//!                      |
//!                 envsync-fs
//! ```
//!
//! Everything except the `*_file` helpers and the `file` adapter works on
//! in-memory [`EnvVars`]; reading and writing env files goes through
//! `envsync-fs`.
//!
//! # Example
//!
//! ```
//! use envsync_core::{EnvVars, compare};
//!
//! let source: EnvVars = [("A", "1"), ("B", "2")].into_iter().collect();
//! let target: EnvVars = [("A", "1"), ("C", "3")].into_iter().collect();
//!
//! let diff = compare(&source, &target);
//! assert_eq!(diff.missing, vec!["B"]);
//! assert_eq!(diff.extra, vec!["C"]);
//! assert_eq!(diff.same, vec!["A"]);
//! ```

pub mod config;
pub mod defaults;
pub mod diff;
pub mod error;
pub mod remote;
pub mod rules;
pub mod schema;
pub mod sync;
pub mod validator;
pub mod vars;

pub use config::{AdapterConfig, AdapterSettings, CONFIG_FILE_NAMES, Config, ConfigResolver};
pub use defaults::{DefaultResolver, DefaultSource, Resolved};
pub use diff::{DiffResult, ValueDiff, compare};
pub use error::{Error, Result};
pub use remote::{AdapterRegistry, FileStore, KeyValueStore, MemoryStore};
pub use rules::{IgnoreSet, Rules};
pub use schema::{Schema, VarType, VariableSpec};
pub use sync::{PushOptions, Reconciler, RemoteState, RemoteSyncResult, SyncResult};
pub use validator::{ValidationError, ValidationResult, Validator};
pub use vars::EnvVars;
