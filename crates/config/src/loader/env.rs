//! Environment variable overlay for a configuration source.
//!
//! Responsibilities:
//! - Map source keys to environment variable names (prefix + separator).
//!   The prefix is always joined with `_`; the configurable separator only
//!   replaces `.` inside the key.
//! - Write environment values over every key the source already knows.
//! - Coerce environment strings toward the type of the value they replace.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//! - Binding sections (see binder.rs).
//!
//! Invariants:
//! - Only keys already present in the source are overridden; an environment
//!   variable cannot make an absent section present.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Values that fail coercion are stored as strings so the bind step
//!   reports the mismatch against the section's field type.
//! - Environment values are never logged, only variable names.

use toml::Value;
use toml::value::Datetime;

use crate::constants::{DEFAULT_ENV_KEY_SEPARATOR, ENV_ARRAY_SEPARATOR, KEY_PATH_SEPARATOR};
use crate::source::ConfigSource;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Naming rule from source keys to environment variables.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EnvOverlay<'a> {
    pub prefix: Option<&'a str>,
    pub separator: char,
}

impl EnvOverlay<'_> {
    /// `db.host` with prefix `app` and separator `_` becomes `APP_DB_HOST`.
    pub fn var_name(&self, key: &str) -> String {
        let body: String = key
            .chars()
            .map(|c| if c == KEY_PATH_SEPARATOR { self.separator } else { c })
            .collect();

        let name = match self.prefix.map(str::trim).filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{prefix}{DEFAULT_ENV_KEY_SEPARATOR}{body}"),
            None => body,
        };
        name.to_uppercase()
    }

    /// Overwrite each known key with its environment value, if one is set.
    ///
    /// Returns the number of keys that were overridden.
    pub fn apply(&self, source: &mut ConfigSource) -> usize {
        let mut applied = 0;

        for key in source.all_keys() {
            let var = self.var_name(&key);
            let Some(raw) = env_var_or_none(&var) else {
                continue;
            };

            let value = coerce(&raw, source.get(&key));
            tracing::debug!(key = %key, var = %var, "Environment overrides configuration key");
            source.set(&key, value);
            applied += 1;
        }

        applied
    }
}

/// Convert an environment string into the type of the value it replaces.
fn coerce(raw: &str, current: Option<&Value>) -> Value {
    match current {
        Some(Value::Integer(_)) => raw
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(Value::Float(_)) => raw
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(Value::Boolean(_)) => parse_bool(raw)
            .map(Value::Boolean)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Some(Value::Datetime(_)) => raw
            .parse::<Datetime>()
            .map(Value::Datetime)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(Value::Array(items)) => Value::Array(
            raw.split(ENV_ARRAY_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| coerce(item, items.first()))
                .collect(),
        ),
        _ => Value::String(raw.to_string()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
