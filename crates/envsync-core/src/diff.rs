//! Structural comparison of two mappings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::EnvVars;

/// Both sides of a key whose values disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDiff {
    pub source: String,
    pub target: String,
}

/// Four-way comparison of a source mapping against a target mapping.
///
/// `missing`, the keys of `different` and `same` partition the source keys;
/// `extra`, the keys of `different` and `same` partition the target keys.
/// All lists are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// In source, absent from target
    pub missing: Vec<String>,
    /// In target, absent from source
    pub extra: Vec<String>,
    /// In both with unequal values
    pub different: BTreeMap<String, ValueDiff>,
    /// In both with equal values
    pub same: Vec<String>,
}

impl DiffResult {
    /// True when nothing is missing, extra or different.
    pub fn is_in_sync(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.different.is_empty()
    }

    pub fn different_keys(&self) -> Vec<&str> {
        self.different.keys().map(String::as_str).collect()
    }
}

/// Compare `source` against `target`.
///
/// Values are compared by exact string equality. Total over all inputs: two
/// empty mappings give an empty result.
pub fn compare(source: &EnvVars, target: &EnvVars) -> DiffResult {
    let mut result = DiffResult::default();

    for (key, source_value) in source.iter() {
        match target.get(key) {
            None => result.missing.push(key.to_string()),
            Some(target_value) if target_value != source_value => {
                result.different.insert(
                    key.to_string(),
                    ValueDiff {
                        source: source_value.to_string(),
                        target: target_value.to_string(),
                    },
                );
            }
            Some(_) => result.same.push(key.to_string()),
        }
    }

    for (key, _) in target.iter() {
        if !source.contains_key(key) {
            result.extra.push(key.to_string());
        }
    }

    // EnvVars iterates in order already; sorting keeps the contract explicit
    result.missing.sort();
    result.extra.sort();
    result.same.sort();

    result
}
