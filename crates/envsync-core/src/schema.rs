//! Declarative variable schema
//!
//! ```yaml
//! schema:
//!   variables:
//!     DATABASE_URL: { required: true, type: url }
//!     PORT:         { type: number, default: "8080" }
//!     LOG_LEVEL:    { pattern: "debug|info|warn|error" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap());
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const BOOLEAN_TOKENS: [&str; 8] = ["true", "false", "1", "0", "yes", "no", "on", "off"];

/// The kind of value a variable must hold.
///
/// Parsed from the free-form `type` string; anything unrecognised is kept in
/// [`VarType::Unknown`] so every value checked against it fails with a clear
/// message instead of the schema failing to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VarType {
    #[default]
    String,
    Number,
    Boolean,
    Url,
    Email,
    Unknown(String),
}

impl VarType {
    /// Check a non-empty value, returning the failure reason.
    pub fn check(&self, value: &str) -> Result<(), String> {
        let ok = match self {
            Self::String => true,
            Self::Number => NUMBER_PATTERN.is_match(value),
            Self::Boolean => BOOLEAN_TOKENS.contains(&value),
            Self::Url => value.starts_with("http://") || value.starts_with("https://"),
            Self::Email => EMAIL_PATTERN.is_match(value),
            Self::Unknown(name) => return Err(format!("unknown type: {}", name)),
        };

        if ok {
            Ok(())
        } else {
            Err(format!("not a valid {}", self.describe()))
        }
    }

    fn describe(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Url => "URL",
            Self::Email => "email",
            Self::Unknown(name) => name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Url => "url",
            Self::Email => "email",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for VarType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "" | "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "url" => Self::Url,
            "email" => Self::Email,
            _ => Self::Unknown(name),
        }
    }
}

impl From<&str> for VarType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<VarType> for String {
    fn from(var_type: VarType) -> Self {
        var_type.as_str().to_string()
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints for one variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableSpec {
    pub required: bool,
    #[serde(rename = "type")]
    pub var_type: VarType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableSpec {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, var_type: impl Into<VarType>) -> Self {
        self.var_type = var_type.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The pattern, treating an empty string as absent.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// The default, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

/// Variable name to constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub variables: BTreeMap<String, VariableSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: impl Into<String>, spec: VariableSpec) -> Self {
        self.variables.insert(name.into(), spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}
