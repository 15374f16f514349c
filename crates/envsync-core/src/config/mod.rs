//! Configuration model and discovery
//!
//! One file configures a project, conventionally `.envsync.yaml` in the
//! working directory:
//!
//! ```yaml
//! schema:
//!   variables:
//!     DATABASE_URL: { required: true, type: url }
//! defaults:
//!   LOG_LEVEL: info
//! rules:
//!   allow_extra: true
//!   ignore_patterns: ["LOCAL_*"]
//! adapter:
//!   name: file
//!   config:
//!     path: .envsync-store.json
//! ```
//!
//! TOML and JSON files with the same shape are accepted when passed
//! explicitly. A project without any config file runs with
//! [`Config::default`].

mod resolver;
mod settings;

pub use resolver::{CONFIG_FILE_NAMES, ConfigResolver};
pub use settings::{AdapterConfig, AdapterSettings, Config};
