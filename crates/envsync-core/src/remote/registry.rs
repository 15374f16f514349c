//! Adapter registry
//!
//! Maps adapter names to factories. The registry is an ordinary value built
//! by the caller; nothing registers itself at load time.

use std::collections::HashMap;

use super::file::{FILE_ADAPTER, FileStore};
use super::memory::{MEMORY_ADAPTER, MemoryStore};
use super::store::KeyValueStore;
use crate::config::AdapterConfig;
use crate::{Error, Result};

/// Builds a store from its adapter config.
pub type AdapterFactory =
    Box<dyn Fn(&AdapterConfig) -> Result<Box<dyn KeyValueStore>> + Send + Sync>;

pub struct AdapterRegistry {
    factories: HashMap<String, AdapterFactory>,
}

impl AdapterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the `file` and `memory` adapters.
    ///
    /// Every `memory` store created here starts empty and lives only as long
    /// as the returned box.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(FILE_ADAPTER, |config| {
            Ok(Box::new(FileStore::from_config(config)?) as Box<dyn KeyValueStore>)
        });
        registry.register(MEMORY_ADAPTER, |_| {
            Ok(Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>)
        });
        registry
    }

    /// Register a factory, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&AdapterConfig) -> Result<Box<dyn KeyValueStore>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Instantiate the adapter registered as `name`.
    pub fn create(&self, name: &str, config: &AdapterConfig) -> Result<Box<dyn KeyValueStore>> {
        let factory = self.factories.get(name).ok_or_else(|| Error::UnknownAdapter {
            name: name.to_string(),
            available: self.list().join(", "),
        })?;

        tracing::debug!(adapter = name, "Creating adapter");
        factory(config)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered adapter names (sorted).
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
