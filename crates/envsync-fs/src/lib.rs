//! Filesystem layer for envsync
//!
//! Provides normalized paths, atomic I/O, format-agnostic config loading
//! and the `.env` codec. Nothing here knows about diffing or schemas.

pub mod config;
pub mod dotenv;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use dotenv::{read_env_file, write_env_file};
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::{NormalizedPath, validate_path_identifier};
