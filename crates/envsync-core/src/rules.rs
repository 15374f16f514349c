//! Project-wide rules from the `rules` config section

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{EnvVars, Error, Result};

/// Rules that tune validation and which keys take part in comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Treat every schema variable as required.
    pub require_all: bool,
    /// When false, variables missing from the schema invalidate validation.
    pub allow_extra: bool,
    /// Glob patterns (`*`, `?`) of keys excluded from every operation.
    pub ignore_patterns: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            require_all: false,
            allow_extra: true,
            ignore_patterns: Vec::new(),
        }
    }
}

/// Compiled form of [`Rules::ignore_patterns`].
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Regex>,
}

impl IgnoreSet {
    pub fn new(globs: &[String]) -> Result<Self> {
        let patterns = globs
            .iter()
            .map(|glob| compile_glob(glob))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(key))
    }

    /// Copy of `vars` without ignored keys.
    pub fn apply(&self, vars: &EnvVars) -> EnvVars {
        if self.patterns.is_empty() {
            return vars.clone();
        }
        vars.filtered(|key| !self.is_ignored(key))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile_glob(glob: &str) -> Result<Regex> {
    if glob.is_empty() {
        return Err(Error::InvalidPattern {
            pattern: glob.to_string(),
            message: "pattern cannot be empty".to_string(),
        });
    }

    let mut regex = String::from("^");
    for ch in glob.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push('$');

    Regex::new(&regex).map_err(|e| Error::InvalidPattern {
        pattern: glob.to_string(),
        message: e.to_string(),
    })
}
