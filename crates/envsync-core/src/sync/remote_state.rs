//! Reconciliation between a local env file and a remote key-value store

use envsync_fs::dotenv::is_valid_key;
use serde::{Deserialize, Serialize};

use super::reconciler::{checked_path, load_env, load_env_or_empty, persist_env};
use crate::config::Config;
use crate::diff::{DiffResult, compare};
use crate::remote::{KeyValueStore, remote_label};
use crate::rules::IgnoreSet;
use crate::{EnvVars, Result};

/// Endpoint label for in-memory local mappings.
pub const LOCAL_LABEL: &str = "local";

/// Outcome of a pull or push. The four key lists are disjoint and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSyncResult {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    pub skipped: Vec<String>,
    pub source: String,
    pub target: String,
}

impl RemoteSyncResult {
    fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    /// True when anything was (or in a dry run, would be) written.
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Classify changes without calling the store's write methods
    pub dry_run: bool,
    /// Delete remote keys the local mapping does not have
    pub prune: bool,
}

/// Pull, push and diff against one store.
pub struct RemoteState {
    store: Box<dyn KeyValueStore>,
    ignore: IgnoreSet,
}

impl RemoteState {
    pub fn new(config: &Config, store: Box<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self {
            store,
            ignore: IgnoreSet::new(&config.rules.ignore_patterns)?,
        })
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Bring remote values into `local`.
    ///
    /// Keys the remote has and `local` lacks are added, keys with different
    /// values are overwritten, local-only keys are kept and reported as
    /// skipped. Remote keys that are not valid variable names (nested
    /// parameters such as `db/URL`) are never brought in and are also
    /// reported as skipped. A remote read failure is returned as an error.
    pub fn pull(&self, prefix: &str, local: &EnvVars) -> Result<(EnvVars, RemoteSyncResult)> {
        let fetched = self.ignore.apply(&self.store.get(prefix)?);
        let unusable: Vec<String> = fetched
            .keys()
            .into_iter()
            .filter(|key| !is_valid_key(key))
            .map(str::to_string)
            .collect();
        if !unusable.is_empty() {
            tracing::warn!(prefix, keys = ?unusable, "Skipping remote keys that are not valid variable names");
        }
        let remote = fetched.filtered(is_valid_key);
        let diff = compare(&remote, &self.ignore.apply(local));

        let mut result = RemoteSyncResult::between(remote_label(self.store(), prefix), LOCAL_LABEL);
        let mut updated = local.clone();

        for key in diff.missing {
            if let Some(value) = remote.get(&key) {
                updated.insert(key.clone(), value);
            }
            result.added.push(key);
        }
        for (key, values) in diff.different {
            updated.insert(key.clone(), values.source);
            result.updated.push(key);
        }
        result.skipped = diff.extra;
        result.skipped.extend(unusable);
        result.skipped.sort();
        result.skipped.dedup();

        tracing::debug!(
            prefix,
            added = result.added.len(),
            updated = result.updated.len(),
            "Pulled remote parameters"
        );
        Ok((updated, result))
    }

    /// Push `local` to the store without deleting anything.
    pub fn push(&self, local: &EnvVars, prefix: &str) -> Result<RemoteSyncResult> {
        self.push_with(local, prefix, &PushOptions::default())
    }

    /// Push `local` to the store.
    ///
    /// The remote is read first to classify keys; if that read fails the
    /// remote is treated as empty. Missing and different keys are written in
    /// one `set` call. Remote-only keys are deleted in one `delete` call when
    /// `options.prune` is set and reported as skipped otherwise.
    pub fn push_with(
        &self,
        local: &EnvVars,
        prefix: &str,
        options: &PushOptions,
    ) -> Result<RemoteSyncResult> {
        let local = self.ignore.apply(local);
        let remote = match self.store.get(prefix) {
            Ok(remote) => self.ignore.apply(&remote),
            Err(e) => {
                tracing::warn!(prefix, error = %e, "Could not read remote store, treating it as empty");
                EnvVars::new()
            }
        };
        let diff = compare(&local, &remote);

        let mut result = RemoteSyncResult::between(LOCAL_LABEL, remote_label(self.store(), prefix));
        let mut staged = EnvVars::new();

        for key in diff.missing {
            if let Some(value) = local.get(&key) {
                staged.insert(key.clone(), value);
            }
            result.added.push(key);
        }
        for (key, values) in diff.different {
            staged.insert(key.clone(), values.source);
            result.updated.push(key);
        }
        if options.prune {
            result.deleted = diff.extra;
        } else {
            result.skipped = diff.extra;
        }

        if options.dry_run {
            tracing::debug!(prefix, staged = staged.len(), "Dry run, not pushing");
            return Ok(result);
        }

        if !staged.is_empty() {
            self.store.set(prefix, &staged)?;
            tracing::info!(prefix, count = staged.len(), "Pushed parameters");
        }
        if !result.deleted.is_empty() {
            self.store.delete(prefix, &result.deleted)?;
            tracing::info!(prefix, count = result.deleted.len(), "Deleted remote parameters");
        }

        Ok(result)
    }

    /// Compare `local` (source) against the remote (target). Read only.
    pub fn diff(&self, local: &EnvVars, prefix: &str) -> Result<DiffResult> {
        let remote = self.store.get(prefix)?;
        Ok(compare(&self.ignore.apply(local), &self.ignore.apply(&remote)))
    }

    /// Pull into the env file at `path`.
    ///
    /// An unreadable local file is treated as empty. The file is rewritten
    /// unless `dry_run` is set or nothing changed.
    pub fn pull_file(&self, prefix: &str, path: &str, dry_run: bool) -> Result<RemoteSyncResult> {
        let path = checked_path(path, "target file path")?;
        let local = load_env_or_empty(&path);

        let (updated, mut result) = self.pull(prefix, &local)?;
        result.target = path.to_string();

        if !dry_run && result.has_changes() {
            persist_env(&path, &updated, "write target")?;
            tracing::info!(target = %path, "Wrote pulled parameters");
        }
        Ok(result)
    }

    /// Push the env file at `path`. The file must be readable.
    pub fn push_file(&self, path: &str, prefix: &str, options: &PushOptions) -> Result<RemoteSyncResult> {
        let path = checked_path(path, "source file path")?;
        let local = load_env(&path, "read source")?;

        let mut result = self.push_with(&local, prefix, options)?;
        result.source = path.to_string();
        Ok(result)
    }

    /// Diff the env file at `path` against the remote.
    pub fn diff_file(&self, path: &str, prefix: &str) -> Result<DiffResult> {
        let path = checked_path(path, "local file path")?;
        let local = load_env(&path, "read local")?;
        self.diff(&local, prefix)
    }
}
