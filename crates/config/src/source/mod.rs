//! Configuration source: the key/value store sections bind from.
//!
//! Responsibilities:
//! - Parse TOML and JSON documents from strings or files.
//! - Resolve the platform-standard config file location.
//! - Provide case-insensitive presence checks, lookups, key enumeration,
//!   per-key assignment, and typed sub-tree deserialization.
//!
//! Does NOT handle:
//! - Environment variable overlay (see `loader::env`).
//! - Section presence, binding, or validation (see `loader`).
//!
//! Invariants / Assumptions:
//! - A source is an explicit value owned by the caller; there is no
//!   process-wide instance.

mod decode;
mod error;
mod file;
mod path;
mod store;

pub use error::SourceError;
pub use file::FileFormat;
pub use store::ConfigSource;
