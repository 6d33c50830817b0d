//! Parsing of configuration documents.
//!
//! Responsibilities:
//! - Detect a document's format from its file extension.
//! - Parse TOML and JSON documents into a `toml::Table`.
//! - Read configuration files from disk.
//!
//! Does NOT handle:
//! - Key normalization or lookups (see `store.rs`).
//! - Environment overlay (see `loader::env`).
//!
//! Invariants:
//! - JSON `null` values are dropped, TOML has no null.
//! - JSON integers above `i64::MAX` are rejected, TOML integers are signed
//!   64-bit. Non-integer numbers become floats.
//! - A JSON document must be an object at the top level.

use std::path::Path;

use toml::{Table, Value};

use super::error::SourceError;

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Select a format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub(crate) fn parse_toml(text: &str) -> Result<Table, toml::de::Error> {
    toml::from_str(text)
}

pub(crate) fn parse_json(text: &str) -> Result<Table, SourceError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    match json_to_toml(document)? {
        Some(Value::Table(table)) => Ok(table),
        _ => Err(SourceError::JsonNotObject),
    }
}

/// Read and parse a configuration file, choosing the parser by extension.
pub(crate) fn read_document(path: &Path) -> Result<Table, SourceError> {
    let format = FileFormat::from_path(path).ok_or_else(|| SourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    match format {
        FileFormat::Toml => parse_toml(&content).map_err(|e| SourceError::ParseToml {
            path: path.to_path_buf(),
            source: e,
        }),
        FileFormat::Json => parse_json(&content).map_err(|e| match e {
            SourceError::InvalidJson(source) => SourceError::ParseJson {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }),
    }
}

fn json_to_toml(value: serde_json::Value) -> Result<Option<Value>, SourceError> {
    let converted = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None if n.is_u64() => {
                return Err(SourceError::IntegerOutOfRange {
                    value: n.to_string(),
                });
            }
            None => return Ok(n.as_f64().map(Value::Float)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                if let Some(item) = json_to_toml(item)? {
                    converted.push(item);
                }
            }
            Value::Array(converted)
        }
        serde_json::Value::Object(map) => {
            let mut table = Table::new();
            for (key, value) in map {
                if let Some(value) = json_to_toml(value)? {
                    table.insert(key, value);
                }
            }
            Value::Table(table)
        }
    };
    Ok(Some(converted))
}
