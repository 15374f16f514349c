//! `.env` file codec
//!
//! Parsing is delegated to `dotenvy`, which reads the common dotenv dialect
//! without touching the process environment:
//!
//! ```text
//! # comment
//! export DATABASE_URL=postgres://localhost/app   # inline comment
//! GREETING="hello\nworld"
//! LITERAL='no $escapes \n here'
//! EMPTY=
//! ```
//!
//! `$NAME` and `${NAME}` in unquoted or double-quoted values expand from the
//! process environment, falling back to earlier entries. Later duplicates win.
//!
//! Serialization is ours so output is deterministic: ascending keys, values
//! double-quoted only when they need it.

use std::collections::BTreeMap;

use crate::{Error, NormalizedPath, Result, io, validate_path_identifier};

/// Parse dotenv content into an ordered map.
pub fn parse_str(content: &str) -> std::result::Result<BTreeMap<String, String>, dotenvy::Error> {
    dotenvy::from_read_iter(content.as_bytes()).collect()
}

/// `[A-Za-z_][A-Za-z0-9_.]*`, the names `parse_str` accepts.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.'))
}

/// Serialize a mapping in ascending key order, one `KEY=VALUE` per line.
///
/// Keys are written as given; [`write_env_file`] rejects names that
/// [`is_valid_key`] does not accept.
pub fn to_string(vars: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(key);
        out.push('=');
        if needs_quoting(value) {
            out.push('"');
            for ch in value.chars() {
                match ch {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '$' => out.push_str("\\$"),
                    '\n' => out.push_str("\\n"),
                    other => out.push(other),
                }
            }
            out.push('"');
        } else {
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#' | '\\' | '$'))
}

/// Read and parse an env file.
///
/// Fails with [`Error::NotFound`] when the path does not exist and
/// [`Error::IsDirectory`] when it names a directory.
pub fn read_env_file(path: &NormalizedPath) -> Result<BTreeMap<String, String>> {
    validate_path_identifier(path.as_str())?;

    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_native(),
        });
    }
    if path.is_dir() {
        return Err(Error::IsDirectory {
            path: path.to_native(),
        });
    }

    let content = io::read_text(path)?;
    let vars = parse_str(&content).map_err(|e| Error::DotenvParse {
        path: path.to_native(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path, count = vars.len(), "Parsed env file");
    Ok(vars)
}

/// Serialize and atomically write an env file.
///
/// Nothing is written if any key is not a valid variable name, so the file
/// always reads back.
pub fn write_env_file(path: &NormalizedPath, vars: &BTreeMap<String, String>) -> Result<()> {
    validate_path_identifier(path.as_str())?;

    if let Some(name) = vars.keys().find(|key| !is_valid_key(key)) {
        return Err(Error::InvalidVariableName {
            path: path.to_native(),
            name: name.clone(),
        });
    }

    io::write_text(path, &to_string(vars))
}
