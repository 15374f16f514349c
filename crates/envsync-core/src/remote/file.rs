//! JSON-document store, registered as `file`

use std::collections::BTreeMap;

use envsync_fs::{ConfigStore, NormalizedPath};

use super::store::{KeyValueStore, key_from_parameter, parameter_name};
use crate::config::AdapterConfig;
use crate::{EnvVars, Error, Result};

pub const FILE_ADAPTER: &str = "file";

/// Document used when the adapter config has no `path`.
pub const DEFAULT_STORE_PATH: &str = ".envsync-store.json";

/// Parameters kept in a local JSON object keyed by full parameter name.
///
/// A missing document reads as an empty store. Writes rewrite the whole
/// document atomically.
#[derive(Debug)]
pub struct FileStore {
    path: NormalizedPath,
    store: ConfigStore,
}

impl FileStore {
    pub fn new(path: NormalizedPath) -> Self {
        Self {
            path,
            store: ConfigStore::new(),
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Result<Self> {
        let path = config
            .get("path")
            .map(String::as_str)
            .unwrap_or(DEFAULT_STORE_PATH);
        if path.trim().is_empty() {
            return Err(Error::adapter(FILE_ADAPTER, "open store", "path cannot be empty"));
        }
        Ok(Self::new(NormalizedPath::new(path)))
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    fn load(&self, operation: &str) -> Result<BTreeMap<String, String>> {
        match self.store.load(&self.path) {
            Ok(parameters) => Ok(parameters),
            Err(e) if e.is_not_found() => Ok(BTreeMap::new()),
            Err(e) => Err(Error::adapter(FILE_ADAPTER, operation, e)),
        }
    }

    fn save(&self, operation: &str, parameters: &BTreeMap<String, String>) -> Result<()> {
        self.store
            .save(&self.path, parameters)
            .map_err(|e| Error::adapter(FILE_ADAPTER, operation, e))
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        FILE_ADAPTER
    }

    fn get(&self, prefix: &str) -> Result<EnvVars> {
        let parameters = self.load("get parameters")?;
        Ok(parameters
            .iter()
            .filter_map(|(name, value)| {
                key_from_parameter(name, prefix).map(|key| (key.to_string(), value.clone()))
            })
            .collect())
    }

    fn set(&self, prefix: &str, vars: &EnvVars) -> Result<()> {
        let mut parameters = self.load("set parameters")?;
        for (key, value) in vars.iter() {
            parameters.insert(parameter_name(prefix, key), value.to_string());
        }
        self.save("set parameters", &parameters)?;
        tracing::debug!(path = %self.path, count = vars.len(), "Stored parameters");
        Ok(())
    }

    fn delete(&self, prefix: &str, keys: &[String]) -> Result<()> {
        let mut parameters = self.load("delete parameters")?;
        for key in keys {
            parameters.remove(&parameter_name(prefix, key));
        }
        self.save("delete parameters", &parameters)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let parameters = self.load("list parameters")?;
        Ok(parameters
            .keys()
            .filter_map(|name| key_from_parameter(name, prefix).map(str::to_string))
            .collect())
    }
}
