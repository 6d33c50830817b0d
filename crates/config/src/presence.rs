//! Presence tracking for configuration sections.
//!
//! Responsibilities:
//! - Record whether a section's key was found in the configuration source.
//! - Expose a read-only query for that state.
//!
//! Does NOT handle:
//! - Deciding presence (see `loader::binder`).
//! - Validation of section contents (see `section::Section::valid`).
//!
//! Invariants:
//! - A fresh `Presence` is disabled.
//! - It transitions to enabled at most once and never resets.
//! - Only this crate can mark it enabled.

/// Embeddable flag that records whether a section was present in the source.
///
/// Sections hold it as a field skipped by serde:
///
/// ```
/// use sectionconf::Presence;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Database {
///     host: String,
///     #[serde(skip)]
///     presence: Presence,
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presence {
    enabled: bool,
}

impl Presence {
    /// Returns `true` once the owning section has been found in the source.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn mark_enabled(&mut self) {
        self.enabled = true;
    }
}
