//! In-process store, registered as `memory`
//!
//! Clones share state, so a test can keep one handle while a boxed clone is
//! driven through [`crate::RemoteState`], then inspect parameters and the
//! recorded calls afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{KeyValueStore, key_from_parameter, parameter_name};
use crate::{EnvVars, Error, Result};

pub const MEMORY_ADAPTER: &str = "memory";

/// A store call as seen by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get { prefix: String },
    Set { prefix: String, keys: Vec<String> },
    Delete { prefix: String, keys: Vec<String> },
    List { prefix: String },
}

#[derive(Debug, Default)]
struct Inner {
    parameters: BTreeMap<String, String>,
    calls: Vec<StoreCall>,
    fail_reads: bool,
    fail_writes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `vars` under `prefix`.
    pub fn seeded(prefix: &str, vars: &EnvVars) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            for (key, value) in vars.iter() {
                inner
                    .parameters
                    .insert(parameter_name(prefix, key), value.to_string());
            }
        }
        store
    }

    /// Make `get` and `list` fail, as an unreachable backend would.
    pub fn fail_reads(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_reads = fail;
        }
    }

    /// Make `set` and `delete` fail.
    pub fn fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Every parameter by full name.
    pub fn parameters(&self) -> BTreeMap<String, String> {
        self.inner
            .lock()
            .map(|inner| inner.parameters.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner
            .lock()
            .map(|inner| inner.calls.clone())
            .unwrap_or_default()
    }

    fn lock(&self, operation: &str) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::adapter(MEMORY_ADAPTER, operation, "store state is poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        MEMORY_ADAPTER
    }

    fn get(&self, prefix: &str) -> Result<EnvVars> {
        let mut inner = self.lock("get parameters")?;
        inner.calls.push(StoreCall::Get {
            prefix: prefix.to_string(),
        });
        if inner.fail_reads {
            return Err(Error::adapter(MEMORY_ADAPTER, "get parameters", "connection refused"));
        }

        Ok(inner
            .parameters
            .iter()
            .filter_map(|(name, value)| {
                key_from_parameter(name, prefix).map(|key| (key.to_string(), value.clone()))
            })
            .collect())
    }

    fn set(&self, prefix: &str, vars: &EnvVars) -> Result<()> {
        let mut inner = self.lock("set parameters")?;
        inner.calls.push(StoreCall::Set {
            prefix: prefix.to_string(),
            keys: vars.keys().into_iter().map(str::to_string).collect(),
        });
        if inner.fail_writes {
            return Err(Error::adapter(MEMORY_ADAPTER, "set parameters", "access denied"));
        }

        for (key, value) in vars.iter() {
            inner
                .parameters
                .insert(parameter_name(prefix, key), value.to_string());
        }
        Ok(())
    }

    fn delete(&self, prefix: &str, keys: &[String]) -> Result<()> {
        let mut inner = self.lock("delete parameters")?;
        inner.calls.push(StoreCall::Delete {
            prefix: prefix.to_string(),
            keys: keys.to_vec(),
        });
        if inner.fail_writes {
            return Err(Error::adapter(MEMORY_ADAPTER, "delete parameters", "access denied"));
        }

        for key in keys {
            inner.parameters.remove(&parameter_name(prefix, key));
        }
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut inner = self.lock("list parameters")?;
        inner.calls.push(StoreCall::List {
            prefix: prefix.to_string(),
        });
        if inner.fail_reads {
            return Err(Error::adapter(MEMORY_ADAPTER, "list parameters", "connection refused"));
        }

        Ok(inner
            .parameters
            .keys()
            .filter_map(|name| key_from_parameter(name, prefix).map(str::to_string))
            .collect())
    }
}
