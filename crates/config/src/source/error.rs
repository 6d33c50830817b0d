//! Error types for building a configuration source.
//!
//! Invariants:
//! - File errors carry the offending path.
//! - Parse errors keep the parser's error as `source` for diagnostics.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing configuration documents.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config file at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse JSON config file at {path}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported config file format at {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid TOML document: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSON integer {value} does not fit in a signed 64-bit integer")]
    IntegerOutOfRange { value: String },

    #[error("JSON configuration must be an object at the top level")]
    JsonNotObject,

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),
}
