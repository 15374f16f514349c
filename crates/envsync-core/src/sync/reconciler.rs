//! Local reconciliation between two env files

use std::collections::BTreeMap;

use envsync_fs::{NormalizedPath, validate_path_identifier};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::defaults::DefaultResolver;
use crate::diff::compare;
use crate::rules::IgnoreSet;
use crate::schema::Schema;
use crate::{EnvVars, Error, Result};

/// Label used when the destination is an in-memory mapping.
pub const TARGET_LABEL: &str = "target";

/// Outcome of a local reconcile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    /// Keys inserted into the target, ascending
    pub added: Vec<String>,
    /// Destination label, the target path for file-level syncs
    pub file_path: String,
}

impl SyncResult {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Fills keys the target lacks, never touching existing target values.
#[derive(Debug, Clone)]
pub struct Reconciler {
    defaults: BTreeMap<String, String>,
    schema: Schema,
    ignore: IgnoreSet,
}

impl Reconciler {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            defaults: config.defaults.clone(),
            schema: config.schema.clone(),
            ignore: IgnoreSet::new(&config.rules.ignore_patterns)?,
        })
    }

    /// Reconcile `target` against `source`, returning the new target.
    ///
    /// Ignored keys take no part in the comparison but stay in the returned
    /// mapping if `target` had them.
    pub fn sync(&self, source: &EnvVars, target: &EnvVars) -> (EnvVars, SyncResult) {
        let diff = compare(&self.ignore.apply(source), &self.ignore.apply(target));
        let resolver = DefaultResolver::new(&self.defaults, &self.schema);

        let mut updated = target.clone();
        let mut result = SyncResult {
            added: Vec::with_capacity(diff.missing.len()),
            file_path: TARGET_LABEL.to_string(),
        };

        for key in diff.missing {
            let Some(resolved) = resolver.resolve(&key, source) else {
                continue;
            };
            tracing::debug!(key = %key, from = ?resolved.from, "Filling missing variable");
            updated.insert(key.clone(), resolved.value);
            result.added.push(key);
        }

        (updated, result)
    }

    /// Reconcile the file at `target_path` against `source_path`.
    ///
    /// The target is written atomically unless `dry_run` is set or nothing
    /// was added. A missing target file is treated as empty.
    pub fn sync_files(&self, source_path: &str, target_path: &str, dry_run: bool) -> Result<SyncResult> {
        let source_path = checked_path(source_path, "source file path")?;
        let target_path = checked_path(target_path, "target file path")?;

        let source = load_env(&source_path, "read source")?;
        let target = if target_path.exists() {
            load_env(&target_path, "read target")?
        } else {
            EnvVars::new()
        };

        let (updated, mut result) = self.sync(&source, &target);
        result.file_path = target_path.to_string();

        if dry_run {
            tracing::debug!(target = %target_path, added = result.added.len(), "Dry run, not writing");
        } else if result.has_changes() {
            persist_env(&target_path, &updated, "write target")?;
            tracing::info!(target = %target_path, added = result.added.len(), "Synced env file");
        }

        Ok(result)
    }
}

pub(crate) fn checked_path(path: &str, what: &str) -> Result<NormalizedPath> {
    validate_path_identifier(path).map_err(|e| Error::invalid_input(format!("{what}: {e}")))?;
    Ok(NormalizedPath::new(path))
}

pub(crate) fn load_env(path: &NormalizedPath, operation: &'static str) -> Result<EnvVars> {
    envsync_fs::read_env_file(path)
        .map(EnvVars::from)
        .map_err(|e| Error::file(operation, path, e))
}

/// Read `path`, falling back to an empty mapping on any failure.
pub(crate) fn load_env_or_empty(path: &NormalizedPath) -> EnvVars {
    match envsync_fs::read_env_file(path) {
        Ok(vars) => EnvVars::from(vars),
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Could not read local file, using empty baseline");
            EnvVars::new()
        }
    }
}

pub(crate) fn persist_env(path: &NormalizedPath, vars: &EnvVars, operation: &'static str) -> Result<()> {
    envsync_fs::write_env_file(path, vars.as_map()).map_err(|e| Error::file(operation, path, e))
}
