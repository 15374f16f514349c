//! Error types for envsync-fs

use std::path::PathBuf;

/// Result type for envsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envsync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Expected a file but got a directory: {path}")]
    IsDirectory { path: PathBuf },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Failed to parse env file {path}: {message}")]
    DotenvParse { path: PathBuf, message: String },

    #[error("Invalid variable name {name:?} for env file {path}")]
    InvalidVariableName { path: PathBuf, name: String },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config at {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the "nothing to read there" family of errors.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::IsDirectory { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
