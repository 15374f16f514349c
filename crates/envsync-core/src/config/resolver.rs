//! Locating and loading the project config file

use envsync_fs::{ConfigStore, NormalizedPath, validate_path_identifier};

use super::settings::Config;
use crate::{Error, Result};

/// File names probed in the project root, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [".envsync.yaml", ".envsync.yml", ".envsync.toml"];

/// Finds and loads the config for a project directory.
///
/// An explicitly given path must exist. Without one, the first of
/// [`CONFIG_FILE_NAMES`] present in the root is used, and a project with
/// none of them gets the default config.
pub struct ConfigResolver {
    root: NormalizedPath,
    explicit: Option<NormalizedPath>,
    store: ConfigStore,
}

impl ConfigResolver {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            explicit: None,
            store: ConfigStore::new(),
        }
    }

    /// Use `path` instead of probing the root. Relative paths are taken
    /// relative to the root.
    pub fn with_explicit_path(root: NormalizedPath, path: &str) -> Result<Self> {
        validate_path_identifier(path)
            .map_err(|_| Error::invalid_input("config path cannot be empty"))?;

        let explicit = if std::path::Path::new(path).is_absolute() {
            NormalizedPath::new(path)
        } else {
            root.join(path)
        };

        Ok(Self {
            root,
            explicit: Some(explicit),
            store: ConfigStore::new(),
        })
    }

    /// The config file that [`ConfigResolver::resolve`] will read, if any.
    pub fn config_path(&self) -> Option<NormalizedPath> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|candidate| candidate.is_file())
    }

    pub fn has_config(&self) -> bool {
        self.config_path().is_some()
    }

    pub fn resolve(&self) -> Result<Config> {
        let Some(path) = self.config_path() else {
            tracing::debug!(root = %self.root, "No config file found, using defaults");
            return Ok(Config::default());
        };

        let config: Config = self
            .store
            .load(&path)
            .map_err(|e| Error::file("load config", &path, e))?;

        tracing::debug!(
            path = %path,
            schema_vars = config.schema.variables.len(),
            defaults = config.defaults.len(),
            adapter = config.adapter.as_ref().map(|a| a.name.as_str()).unwrap_or("none"),
            "Loaded config"
        );
        Ok(config)
    }
}
