//! Binding of one section against a configuration source.
//!
//! Responsibilities:
//! - Check whether a section's key is present.
//! - Deserialize the key's sub-tree into the section and mark it enabled.
//! - Run the section's validation predicate.
//!
//! Does NOT handle:
//! - Environment overlay (applied by the loader before any bind).
//! - Ordering or fail-fast across sections (see builder.rs).
//!
//! Invariants:
//! - A section is marked enabled iff its key is present, even when the
//!   sub-tree then fails to deserialize.
//! - An absent optional section is left untouched and is not an error.
//! - Validation runs only after a successful deserialize.

use super::error::SectionError;
use crate::section::{Bindable, Section};
use crate::source::ConfigSource;

/// Bind a single section under its declared key.
///
/// This is the same step [`ConfigLoader::load`](crate::ConfigLoader::load)
/// runs per section, without the environment overlay.
pub fn bind_section<S: Section>(source: &ConfigSource, section: &mut S) -> Result<(), SectionError> {
    let key = S::key().to_lowercase();
    bind(source, section, &key)
}

pub(crate) fn bind(
    source: &ConfigSource,
    target: &mut dyn Bindable,
    key: &str,
) -> Result<(), SectionError> {
    if !source.is_set(key) {
        if target.is_mandatory() {
            tracing::warn!(key = %key, "Mandatory configuration section is missing");
            return Err(SectionError::Missing {
                key: key.to_string(),
            });
        }
        tracing::debug!(key = %key, "Optional configuration section absent, leaving defaults");
        return Ok(());
    }

    let bound = target.bind_from(source, key);
    target.mark_enabled();
    bound.map_err(|e| SectionError::Bind {
        key: key.to_string(),
        source: e,
    })?;

    if !target.is_valid() {
        tracing::warn!(key = %key, "Configuration section failed validation");
        return Err(SectionError::Invalid {
            key: key.to_string(),
        });
    }

    tracing::info!(key = %key, "Configuration section enabled");
    Ok(())
}
