//! Project context shared by all commands
//!
//! Resolves the config once from the working directory (or `--config`) and
//! turns relative file arguments into paths under the project root.

use std::path::Path;

use envsync_core::{
    AdapterConfig, AdapterRegistry, Config, ConfigResolver, EnvVars, IgnoreSet, RemoteState,
};
use envsync_fs::NormalizedPath;

use crate::error::Result;

/// Adapter config key holding a filesystem path, resolved against the root.
const PATH_KEY: &str = "path";

pub struct Context {
    root: NormalizedPath,
    config: Config,
    json: bool,
}

impl Context {
    pub fn load(cwd: &Path, config_path: Option<&str>, json: bool) -> Result<Self> {
        let root = NormalizedPath::new(cwd);
        let resolver = match config_path {
            Some(path) => ConfigResolver::with_explicit_path(root.clone(), path)?,
            None => ConfigResolver::new(root.clone()),
        };
        let config = resolver.resolve()?;

        Ok(Self { root, config, json })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn json(&self) -> bool {
        self.json
    }

    /// `path` as given when absolute, otherwise joined to the project root.
    pub fn resolve_path(&self, path: &str) -> String {
        if path.trim().is_empty() || Path::new(path).is_absolute() {
            path.to_string()
        } else {
            self.root.join(path).to_string()
        }
    }

    pub fn ignore_set(&self) -> Result<IgnoreSet> {
        Ok(IgnoreSet::new(&self.config.rules.ignore_patterns)?)
    }

    pub fn read_env(&self, path: &str) -> Result<EnvVars> {
        let path = NormalizedPath::new(self.resolve_path(path));
        Ok(envsync_fs::read_env_file(&path)?.into())
    }

    /// Remote state for the configured adapter.
    pub fn remote_state(&self, registry: &AdapterRegistry) -> Result<RemoteState> {
        let settings = self.config.adapter()?;
        let adapter_config = self.adapter_config(&settings.config);

        let store = registry.create(&settings.name, &adapter_config)?;
        tracing::debug!(adapter = %settings.name, "Using adapter");
        Ok(RemoteState::new(&self.config, store)?)
    }

    fn adapter_config(&self, config: &AdapterConfig) -> AdapterConfig {
        let mut config = config.clone();
        if let Some(path) = config.get_mut(PATH_KEY) {
            *path = self.resolve_path(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envsync_test_utils::TestProject;

    #[test]
    fn test_relative_paths_join_root() {
        let project = TestProject::new();
        let ctx = Context::load(project.root(), None, false).unwrap();

        assert!(ctx.resolve_path(".env").ends_with("/.env"));
        assert!(ctx.resolve_path(".env").starts_with(&NormalizedPath::new(project.root()).to_string()));
        assert_eq!(ctx.resolve_path("/abs/.env"), "/abs/.env");
    }

    #[test]
    fn test_remote_state_requires_adapter() {
        let project = TestProject::new();
        let ctx = Context::load(project.root(), None, false).unwrap();

        let err = ctx.remote_state(&AdapterRegistry::with_builtins()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "No adapter configured. Please specify adapter in config file"
        );
    }

    #[test]
    fn test_file_adapter_path_is_project_relative() {
        let project = TestProject::new();
        project.write_config("adapter:\n  name: file\n  config:\n    path: store.json\n");
        let ctx = Context::load(project.root(), None, false).unwrap();

        let state = ctx.remote_state(&AdapterRegistry::with_builtins()).unwrap();
        state
            .push(&[("A", "1")].into_iter().collect(), "/")
            .unwrap();

        project.assert_file_exists("store.json");
    }
}
