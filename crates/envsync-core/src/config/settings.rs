//! The deserialized shape of `.envsync.yaml`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::Rules;
use crate::schema::Schema;
use crate::{Error, Result};

/// Adapter-specific string settings (region, path, ...).
pub type AdapterConfig = BTreeMap<String, String>;

/// Which store adapter remote commands use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSettings {
    pub name: String,
    #[serde(default)]
    pub config: AdapterConfig,
}

/// Complete project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema: Schema,
    /// Fill values for local reconciliation, highest priority
    pub defaults: BTreeMap<String, String>,
    pub rules: Rules,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<AdapterSettings>,
}

impl Config {
    /// The adapter section, or [`Error::NoAdapterConfigured`] when absent or
    /// unnamed.
    pub fn adapter(&self) -> Result<&AdapterSettings> {
        match &self.adapter {
            Some(settings) if !settings.name.trim().is_empty() => Ok(settings),
            _ => Err(Error::NoAdapterConfigured),
        }
    }
}
