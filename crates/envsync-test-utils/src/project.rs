//! [`TestProject`] builder for envsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for writing env files and
/// config, and asserting on the results.
///
/// # Example
///
/// ```rust,no_run
/// use envsync_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.write_env(".env.example", &[("DATABASE_URL", "postgres://localhost")]);
/// project.write_config("defaults:\n  LOG_LEVEL: info\n");
/// project.assert_file_exists(".env.example");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the project.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Same as [`TestProject::path`] as an owned string, for APIs taking `&str`.
    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }

    /// Write `KEY=VALUE` lines in the given order. Values are written raw,
    /// so callers quote them when needed.
    pub fn write_env(&self, name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let content: String = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        self.write_file(name, &content)
    }

    /// Write `.envsync.yaml` with the given YAML body.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        self.write_file(".envsync.yaml", yaml)
    }

    /// Write an arbitrary file, creating parent directories.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read a file inside the project.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, name: &str) -> String {
        let path = self.path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `name` (relative to the project root) exists.
    pub fn assert_file_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `name` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, name: &str) {
        let full_path = self.path(name);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `name` contains the line `KEY=VALUE`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or lacks the line.
    pub fn assert_env_line(&self, name: &str, key: &str, value: &str) {
        let content = self.read_file(name);
        let expected = format!("{key}={value}");
        assert!(
            content.lines().any(|line| line == expected),
            "File {} does not contain line {:?}.\nActual:\n{}",
            name,
            expected,
            content
        );
    }
}
