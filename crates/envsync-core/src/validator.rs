//! Schema-driven validation of a single mapping

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::{IgnoreSet, Rules};
use crate::schema::{Schema, VariableSpec};
use crate::{EnvVars, Result};

/// One failed check for one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub variable: String,
    pub message: String,
}

impl ValidationError {
    fn new(variable: &str, message: impl Into<String>) -> Self {
        Self {
            variable: variable.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of [`Validator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// False iff `missing` or `errors` is non-empty
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    /// Required variables absent from the mapping, sorted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    /// Variables not declared in the schema, sorted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl ValidationResult {
    pub fn errors_for(&self, variable: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.variable == variable)
            .map(|e| e.message.as_str())
            .collect()
    }
}

/// Validates mappings against a [`Schema`].
///
/// Patterns are compiled once at construction. A pattern that does not
/// compile is not fatal: it turns into a validation error on every value it
/// is applied to.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    rules: Rules,
    ignore: IgnoreSet,
    patterns: BTreeMap<String, std::result::Result<Regex, String>>,
}

impl Validator {
    /// Validator with default rules.
    pub fn new(schema: Schema) -> Self {
        let patterns = compile_patterns(&schema);
        Self {
            schema,
            rules: Rules::default(),
            ignore: IgnoreSet::default(),
            patterns,
        }
    }

    /// Validator honouring `require_all`, `allow_extra` and `ignore_patterns`.
    pub fn with_rules(schema: Schema, rules: Rules) -> Result<Self> {
        let ignore = IgnoreSet::new(&rules.ignore_patterns)?;
        let patterns = compile_patterns(&schema);
        Ok(Self {
            schema,
            rules,
            ignore,
            patterns,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validate(&self, vars: &EnvVars) -> ValidationResult {
        let vars = self.ignore.apply(vars);
        tracing::debug!(
            schema_vars = ?self.schema.variables.keys().collect::<Vec<_>>(),
            env_vars = ?vars.keys(),
            "Validating"
        );

        let mut errors = Vec::new();
        let mut missing = Vec::new();

        for (name, spec) in &self.schema.variables {
            if self.ignore.is_ignored(name) {
                continue;
            }
            let required = spec.required || self.rules.require_all;
            match vars.get(name) {
                None if required => missing.push(name.clone()),
                None => {}
                Some(value) => errors.extend(self.validate_variable(name, spec, required, value)),
            }
        }

        let mut extra: Vec<String> = vars
            .keys()
            .into_iter()
            .filter(|key| !self.schema.contains(key))
            .map(str::to_string)
            .collect();

        missing.sort();
        extra.sort();

        if !self.rules.allow_extra {
            errors.extend(
                extra
                    .iter()
                    .map(|key| ValidationError::new(key, "variable is not declared in schema")),
            );
        }

        ValidationResult {
            valid: missing.is_empty() && errors.is_empty(),
            errors,
            missing,
            extra,
        }
    }

    fn validate_variable(
        &self,
        name: &str,
        spec: &VariableSpec,
        required: bool,
        value: &str,
    ) -> Vec<ValidationError> {
        if value.is_empty() {
            return if required {
                vec![ValidationError::new(name, "required variable is empty")]
            } else {
                Vec::new()
            };
        }

        let mut errors = Vec::new();

        if let Err(reason) = spec.var_type.check(value) {
            errors.push(ValidationError::new(
                name,
                format!("type validation failed: {}", reason),
            ));
        }

        if let Some(pattern) = spec.pattern() {
            match self.patterns.get(name) {
                Some(Ok(regex)) if !regex.is_match(value) => errors.push(ValidationError::new(
                    name,
                    format!("value does not match pattern: {}", pattern),
                )),
                Some(Err(reason)) => errors.push(ValidationError::new(
                    name,
                    format!("pattern validation error: {}", reason),
                )),
                _ => {}
            }
        }

        errors
    }
}

/// Patterns must match the whole value, so each is wrapped in `^(?:...)$`.
fn compile_patterns(schema: &Schema) -> BTreeMap<String, std::result::Result<Regex, String>> {
    schema
        .variables
        .iter()
        .filter_map(|(name, spec)| {
            let pattern = spec.pattern()?;
            let compiled = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| e.to_string());
            Some((name.clone(), compiled))
        })
        .collect()
}
