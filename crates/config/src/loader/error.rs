//! Error types for section loading.
//!
//! Responsibilities:
//! - Define the per-section failure taxonomy (`SectionError`).
//! - Define the load-level error (`ConfigError`) that wraps section,
//!   source, and dotenv failures.
//! - Provide classification helpers so callers can match on failure kind.
//!
//! Invariants:
//! - Every section error names the offending key.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::source::SourceError;

/// Failure while binding one section.
#[derive(Error, Debug)]
pub enum SectionError {
    /// A mandatory section's key was absent from the source.
    #[error("missing conf key configuration: {key}")]
    Missing { key: String },

    /// The sub-tree at `key` does not fit the section's field layout.
    #[error("reading config [{key}]: {source}")]
    Bind {
        key: String,
        source: toml::de::Error,
    },

    /// The section bound but rejected its own contents.
    #[error("config [{key}] is invalid: invalid configuration")]
    Invalid { key: String },
}

impl SectionError {
    /// The key of the section that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key } | Self::Bind { key, .. } | Self::Invalid { key } => key,
        }
    }

    pub fn is_missing_configuration(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    pub fn is_bind_failure(&self) -> bool {
        matches!(self, Self::Bind { .. })
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A section failed; loading stopped at that section.
    #[error("reading key: {0}")]
    ReadKey(#[from] SectionError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// The section error behind this failure, if a section failed.
    pub fn section_error(&self) -> Option<&SectionError> {
        match self {
            Self::ReadKey(inner) => Some(inner),
            _ => None,
        }
    }

    /// Key of the section that failed, if any.
    pub fn key(&self) -> Option<&str> {
        self.section_error().map(SectionError::key)
    }

    pub fn is_missing_configuration(&self) -> bool {
        self.section_error()
            .is_some_and(SectionError::is_missing_configuration)
    }

    pub fn is_bind_failure(&self) -> bool {
        self.section_error().is_some_and(SectionError::is_bind_failure)
    }

    pub fn is_invalid_configuration(&self) -> bool {
        self.section_error()
            .is_some_and(SectionError::is_invalid_configuration)
    }
}
