//! In-memory key/value store for configuration documents.
//!
//! Responsibilities:
//! - Hold the merged configuration tree with case-insensitive keys.
//! - Answer presence, lookup, and key enumeration queries on dotted paths.
//! - Deserialize a sub-tree into a typed target.
//!
//! Does NOT handle:
//! - Environment variables (see `loader::env`, which writes through `set`).
//! - Section presence tracking or validation (see `loader::binder`).
//!
//! Invariants:
//! - Every stored table key is lower-case; all lookups lower-case their input.
//! - `all_keys()` lists leaves in sorted order. Arrays are leaves, and an
//!   empty table is listed as its own key.
//! - Deserialization ignores source keys the target does not declare and
//!   matches struct field names ignoring ASCII case.
//! - `unmarshal_key_over` keeps every value of the current target that the
//!   source sub-tree does not mention.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::{Table, Value};

use super::decode::from_value;
use super::error::SourceError;
use super::file::{parse_json, parse_toml, read_document};
use super::path::default_config_path;
use crate::constants::KEY_PATH_SEPARATOR;

/// Layered configuration source backed by a TOML value tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSource {
    root: Table,
}

impl ConfigSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, SourceError> {
        Ok(Self::from_table(parse_toml(text)?))
    }

    /// Build a source from a JSON document whose top level is an object.
    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        Ok(Self::from_table(parse_json(text)?))
    }

    /// Build a source from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let source = Self::from_table(read_document(path)?);
        tracing::debug!(
            path = %path.display(),
            keys = source.all_keys().len(),
            "Loaded configuration file"
        );
        Ok(source)
    }

    /// Build a source from the platform-standard location for `app_name`.
    ///
    /// A missing file yields an empty source.
    pub fn from_default_location(app_name: &str) -> Result<Self, SourceError> {
        let path = default_config_path(app_name)
            .map_err(|e| SourceError::ConfigDirUnavailable(e.to_string()))?;

        if !path.exists() {
            tracing::debug!(
                path = %path.display(),
                "No configuration file at default location, using empty source"
            );
            return Ok(Self::new());
        }

        Self::from_file(&path)
    }

    fn from_table(table: Table) -> Self {
        Self {
            root: normalize_table(table),
        }
    }

    /// Overlay another TOML document; its values win, tables merge recursively.
    pub fn merge_toml_str(&mut self, text: &str) -> Result<(), SourceError> {
        let overlay = normalize_table(parse_toml(text)?);
        merge_tables(&mut self.root, overlay);
        Ok(())
    }

    /// Remove every key.
    pub fn reset(&mut self) {
        self.root = Table::new();
    }

    /// Whether `key` (a dotted path, case-insensitive) resolves to a value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up the value at a dotted path.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = key.to_lowercase();
        let mut segments = key.split(KEY_PATH_SEPARATOR);
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    /// Assign a value at a dotted path, creating intermediate tables.
    ///
    /// A non-table value found on the way is replaced by a table.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let key = key.to_lowercase();
        let segments: Vec<&str> = key.split(KEY_PATH_SEPARATOR).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut table = &mut self.root;
        for segment in parents {
            let entry = table
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            let Value::Table(next) = entry else {
                return;
            };
            table = next;
        }

        table.insert(last.to_string(), normalize_value(value.into()));
    }

    /// Every leaf key as a sorted list of dotted paths.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, None, &mut keys);
        keys.sort();
        keys
    }

    /// Deserialize the sub-tree at `key` into `T`.
    ///
    /// An absent key deserializes from an empty table.
    pub fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<T, toml::de::Error> {
        let value = self
            .get(key)
            .cloned()
            .unwrap_or_else(|| Value::Table(Table::new()));
        from_value(value)
    }

    /// Deserialize the sub-tree at `key` over the values already in `current`.
    ///
    /// Fields the sub-tree does not mention keep their current values. When
    /// `current` cannot be represented as a table, or the sub-tree is not a
    /// table, this falls back to [`unmarshal_key`](Self::unmarshal_key).
    pub fn unmarshal_key_over<T>(&self, key: &str, current: &T) -> Result<T, toml::de::Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(Value::Table(overlay)) = self.get(key) else {
            return self.unmarshal_key(key);
        };

        let mut base = match Value::try_from(current) {
            Ok(Value::Table(table)) => normalize_table(table),
            Ok(_) => Table::new(),
            Err(e) => {
                tracing::debug!(
                    key = %key,
                    error = %e,
                    "Current section values are not representable, binding from source only"
                );
                Table::new()
            }
        };
        merge_tables(&mut base, overlay.clone());
        from_value(Value::Table(base))
    }
}

fn normalize_table(table: Table) -> Table {
    table
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), normalize_value(v)))
        .collect()
}

fn normalize_value(value: Value) -> Value {
    match value {
        Value::Table(table) => Value::Table(normalize_table(table)),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        other => other,
    }
}

fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match value {
            Value::Table(incoming) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn collect_keys(table: &Table, prefix: Option<&str>, out: &mut Vec<String>) {
    for (key, value) in table {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{KEY_PATH_SEPARATOR}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Table(inner) if !inner.is_empty() => collect_keys(inner, Some(&path), out),
            _ => out.push(path),
        }
    }
}
