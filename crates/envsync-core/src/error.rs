//! Error types for envsync-core

/// Result type for envsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in envsync-core operations
///
/// A failed validation is not an error: it is reported through
/// [`crate::ValidationResult::valid`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty or malformed identifier, rejected before any comparison runs
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Failure reported by a key-value store adapter
    #[error("Adapter {adapter} failed to {operation}: {message}")]
    Adapter {
        adapter: String,
        operation: String,
        message: String,
    },

    /// No factory registered under this name
    #[error("Unknown adapter: {name} (available: {available})")]
    UnknownAdapter { name: String, available: String },

    /// Remote command run without an `adapter` section in the config
    #[error("No adapter configured. Please specify adapter in config file")]
    NoAdapterConfigured,

    /// An ignore pattern from the rules section could not be compiled
    #[error("Invalid ignore pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// File-level failure with the operation that triggered it
    #[error("Failed to {operation} {path}: {source}")]
    File {
        operation: &'static str,
        path: String,
        #[source]
        source: envsync_fs::Error,
    },

    /// Filesystem error from envsync-fs
    #[error(transparent)]
    Fs(#[from] envsync_fs::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn adapter(
        adapter: impl Into<String>,
        operation: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::Adapter {
            adapter: adapter.into(),
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn file(
        operation: &'static str,
        path: impl std::fmt::Display,
        source: envsync_fs::Error,
    ) -> Self {
        Self::File {
            operation,
            path: path.to_string(),
            source,
        }
    }
}
