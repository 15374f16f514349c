//! Layered resolution of fill values for missing keys
//!
//! When local reconciliation inserts a key the target lacks, the value comes
//! from the first layer that has one:
//!
//! 1. `defaults` in the config file
//! 2. the schema's `default` for the variable (if non-empty)
//! 3. the source mapping's own value

use std::collections::BTreeMap;

use serde::Serialize;

use crate::EnvVars;
use crate::schema::Schema;

/// One layer of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSource {
    ConfigDefaults,
    SchemaDefaults,
    SourceValue,
}

impl DefaultSource {
    /// Fixed evaluation order, highest priority first.
    pub const PRIORITY: [DefaultSource; 3] = [
        DefaultSource::ConfigDefaults,
        DefaultSource::SchemaDefaults,
        DefaultSource::SourceValue,
    ];
}

/// A resolved fill value and the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub from: DefaultSource,
}

/// Evaluates [`DefaultSource::PRIORITY`] against borrowed config and schema.
#[derive(Debug, Clone, Copy)]
pub struct DefaultResolver<'a> {
    config_defaults: &'a BTreeMap<String, String>,
    schema: &'a Schema,
}

impl<'a> DefaultResolver<'a> {
    pub fn new(config_defaults: &'a BTreeMap<String, String>, schema: &'a Schema) -> Self {
        Self {
            config_defaults,
            schema,
        }
    }

    fn lookup(&self, layer: DefaultSource, key: &str, source: &EnvVars) -> Option<String> {
        match layer {
            DefaultSource::ConfigDefaults => self.config_defaults.get(key).cloned(),
            DefaultSource::SchemaDefaults => self
                .schema
                .get(key)
                .and_then(|spec| spec.default_value())
                .map(str::to_string),
            DefaultSource::SourceValue => source.get(key).map(str::to_string),
        }
    }

    /// Resolve a fill value for `key`.
    ///
    /// Returns `None` only when no layer knows the key, which cannot happen
    /// for keys reported missing by [`crate::compare`] since those exist in
    /// `source`.
    pub fn resolve(&self, key: &str, source: &EnvVars) -> Option<Resolved> {
        DefaultSource::PRIORITY.iter().find_map(|&layer| {
            self.lookup(layer, key, source)
                .map(|value| Resolved { value, from: layer })
        })
    }
}
