//! Typed configuration sections loaded from a layered source.
//!
//! This crate binds independently typed configuration sections from one
//! shared source (TOML/JSON file plus environment variables), validates each
//! one, and records whether its key was present.

pub mod constants;
mod loader;
mod presence;
mod section;
pub mod source;

pub use loader::{ConfigError, ConfigLoader, SectionError, bind_section, env_var_or_none};
pub use presence::Presence;
pub use section::{Registration, Section, derive_key, section, section_with_key};
pub use source::{ConfigSource, FileFormat, SourceError};
