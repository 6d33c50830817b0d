//! Path helpers for configuration file locations.
//!
//! Responsibilities:
//! - Determine the platform-standard configuration file path for an application.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations (see `file.rs`).

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::DEFAULT_CONFIG_FILE_NAME;

/// Returns the default path to an application's configuration file.
///
/// - Linux: `~/.config/<app_name>/config.toml`
/// - macOS: `~/Library/Application Support/<app_name>/config.toml`
/// - Windows: `%AppData%\<app_name>\config\config.toml`
pub(crate) fn default_config_path(app_name: &str) -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", app_name)
        .with_context(|| format!("Failed to determine project directories for {app_name}"))?;

    Ok(proj_dirs.config_dir().join(DEFAULT_CONFIG_FILE_NAME))
}
