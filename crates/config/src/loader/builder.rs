//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` holding the environment
//!   overlay settings (prefix, key separator, automatic env).
//! - Force environment precedence over every key the source knows.
//! - Drive the binder across caller-supplied sections in order.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Per-section presence, binding, and validation (delegated to binder.rs).
//! - File parsing (see `source`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - Sections bind in the order given; the first failure stops the load and
//!   sections bound before it keep their values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use super::binder::bind;
use super::env::EnvOverlay;
use super::error::ConfigError;
use crate::constants::{DEFAULT_ENV_KEY_SEPARATOR, DOTENV_DISABLED_VAR};
use crate::section::Registration;
use crate::source::ConfigSource;

/// Loader that overlays the environment onto a source and binds sections from it.
///
/// ```
/// use sectionconf::{ConfigLoader, ConfigSource, Presence, Section, section};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Database {
///     host: String,
///     #[serde(skip)]
///     presence: Presence,
/// }
///
/// impl Section for Database {
///     fn presence(&self) -> &Presence { &self.presence }
///     fn presence_mut(&mut self) -> &mut Presence { &mut self.presence }
///     fn valid(&self) -> bool { !self.host.is_empty() }
/// }
///
/// let mut source = ConfigSource::from_toml_str("[database]\nhost = \"db.local\"\n")?;
/// let mut database = Database::default();
///
/// ConfigLoader::new()
///     .with_env_prefix("DOCTEST_APP")
///     .load(&mut source, [section(&mut database)])?;
///
/// assert!(database.enabled());
/// assert_eq!(database.host, "db.local");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: Option<String>,
    key_separator: char,
    automatic_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            env_prefix: None,
            key_separator: DEFAULT_ENV_KEY_SEPARATOR,
            automatic_env: true,
        }
    }

    /// Set the environment variable prefix (`APP` selects `APP_<KEY>`).
    ///
    /// An empty prefix selects unprefixed variable names.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Set the character that replaces `.` between key segments in
    /// environment variable names.
    ///
    /// The prefix is still joined with `_`: prefix `APP` and separator `-`
    /// map `db.host` to `APP_DB-HOST`.
    pub fn with_key_separator(mut self, separator: char) -> Self {
        self.key_separator = separator;
        self
    }

    /// Enable or disable the environment overlay (enabled by default).
    pub fn with_automatic_env(mut self, enabled: bool) -> Self {
        self.automatic_env = enabled;
        self
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    pub fn automatic_env(&self) -> bool {
        self.automatic_env
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    fn overlay(&self) -> EnvOverlay<'_> {
        EnvOverlay {
            prefix: self.env_prefix.as_deref(),
            separator: self.key_separator,
        }
    }

    /// The environment variable consulted for `key`.
    pub fn env_var_name(&self, key: &str) -> String {
        self.overlay().var_name(key)
    }

    /// Write environment values over every key the source knows.
    ///
    /// Returns the number of keys overridden. `load` calls this first when
    /// automatic env is enabled.
    pub fn apply_env(&self, source: &mut ConfigSource) -> usize {
        self.overlay().apply(source)
    }

    /// Overlay the environment, then bind each section in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadKey` for the first section that is missing
    /// while mandatory, fails to deserialize, or fails validation. Later
    /// sections are not bound.
    pub fn load<'a, I>(&self, source: &mut ConfigSource, sections: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Registration<'a>>,
    {
        if self.automatic_env {
            let applied = self.apply_env(source);
            tracing::debug!(
                prefix = self.env_prefix.as_deref().unwrap_or(""),
                applied,
                "Applied environment overlay"
            );
        }

        let source: &ConfigSource = source;
        let mut bound = 0usize;
        for registration in sections {
            let (key, target) = registration.into_parts();
            bind(source, target, &key)?;
            bound += 1;
        }

        tracing::debug!(sections = bound, "Configuration sections loaded");
        Ok(())
    }
}
