//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// Take an advisory lock on the temp file before writing.
    pub enable_locking: bool,
    /// Give up acquiring the lock after this long.
    pub lock_timeout: Duration,
    /// fsync the temp file before the rename.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            enable_locking: true,
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Write content atomically to a file with locking.
///
/// Writes a sibling temp file (same directory, so same filesystem) and
/// renames it over the destination. The destination is either the old
/// content or the new content, never a partial write. The temp file is
/// removed if any step fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], config: RobustnessConfig) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let result = write_temp_then_rename(&temp_path, &native_path, content, config);
    if result.is_err() && temp_path.exists() {
        // Best effort; the original error is what the caller needs.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp_then_rename(
    temp_path: &Path,
    native_path: &Path,
    content: &[u8],
    config: RobustnessConfig,
) -> Result<()> {
    let mut temp_file = open_private(temp_path).map_err(|e| Error::io(temp_path, e))?;

    if config.enable_locking {
        lock_with_backoff(&temp_file, config.lock_timeout).map_err(|_| Error::LockFailed {
            path: native_path.to_path_buf(),
        })?;
    }

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if config.enable_fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    }

    if config.enable_locking {
        FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
            path: native_path.to_path_buf(),
        })?;
    }
    drop(temp_file);

    fs::rename(temp_path, native_path).map_err(|e| Error::io(native_path, e))?;

    tracing::debug!(path = %native_path.display(), bytes = content.len(), "Wrote file atomically");
    Ok(())
}

/// Env files carry secrets, so they are created owner-only on Unix.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

fn lock_with_backoff(file: &File, timeout: Duration) -> std::io::Result<()> {
    let policy = ExponentialBackoff {
        initial_interval: Duration::from_millis(10),
        max_interval: Duration::from_millis(250),
        max_elapsed_time: Some(timeout),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        FileExt::try_lock_exclusive(file).map_err(backoff::Error::transient)
    })
    .map_err(|e| match e {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { err, .. } => err,
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically with default robustness settings.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes(), RobustnessConfig::default())
}
