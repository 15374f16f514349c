//! The key-value store capability consumed by remote reconciliation

use crate::{EnvVars, Result};

/// A remote parameter store addressed by prefix.
///
/// Keys passed in and returned are relative to the prefix; adapters map
/// them to their own naming (see [`parameter_name`]). Every method is a
/// single blocking call; failures come back as
/// [`crate::Error::Adapter`] and are never retried by the caller.
pub trait KeyValueStore {
    /// Short adapter name used in endpoint labels, e.g. `aws-ssm`.
    fn name(&self) -> &str;

    /// Every key under `prefix` with its value.
    fn get(&self, prefix: &str) -> Result<EnvVars>;

    /// Create or overwrite all of `vars` under `prefix` in one batch.
    fn set(&self, prefix: &str, vars: &EnvVars) -> Result<()>;

    /// Remove `keys` under `prefix` in one batch.
    fn delete(&self, prefix: &str, keys: &[String]) -> Result<()>;

    /// Sorted keys under `prefix`.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Parameter-store style prefix: leading and trailing `/`, `/` when empty.
pub fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = String::with_capacity(prefix.len() + 2);
    if !prefix.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(prefix);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Full parameter name for `key` under `prefix`.
pub fn parameter_name(prefix: &str, key: &str) -> String {
    format!("{}{}", normalize_prefix(prefix), key)
}

/// Key relative to `prefix`, or `None` when `name` lies outside it.
pub fn key_from_parameter<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(normalize_prefix(prefix).as_str())
        .filter(|key| !key.is_empty())
}

/// Endpoint label for reports, `<adapter>:<prefix>`.
pub fn remote_label(store: &dyn KeyValueStore, prefix: &str) -> String {
    format!("{}:{}", store.name(), prefix)
}
