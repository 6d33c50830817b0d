//! Centralized constants for section loading.
//!
//! These values define the naming rules shared by the source, the
//! environment overlay, and the dotenv gate.

// =============================================================================
// Environment Overlay
// =============================================================================

/// Separator that joins the prefix to the key in environment variable names,
/// and the default replacement for `.` inside the key
/// (`db.host` with prefix `APP` becomes `APP_DB_HOST`).
pub const DEFAULT_ENV_KEY_SEPARATOR: char = '_';

/// Separator between nested key segments in the source.
pub const KEY_PATH_SEPARATOR: char = '.';

/// Separator used to split an environment value that overrides an array key.
pub const ENV_ARRAY_SEPARATOR: char = ',';

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// File Locations
// =============================================================================

/// File name looked up inside the platform configuration directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.toml";
