//! Section loader for environment variables and configuration sources.
//!
//! Responsibilities:
//! - Overlay environment variables onto a `ConfigSource` (prefix, key
//!   separator, automatic env).
//! - Bind registered sections: presence check, deserialize, mark enabled, validate.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Parsing configuration files (see `source`).
//! - Defining section types (callers implement `Section`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - A load stops at the first failing section.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod binder;
mod builder;
mod env;
mod error;

pub use binder::bind_section;
pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::{ConfigError, SectionError};

#[cfg(test)]
mod tests;
