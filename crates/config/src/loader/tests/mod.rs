//! Tests for the section loader.
//!
//! Responsibilities:
//! - Test multi-section loads, ordering, and fail-fast behavior.
//! - Test environment variable overlay and precedence.
//! - Test dotenv loading and its `DOTENV_DISABLED` gate.
//! - Test loading sources from files end to end.
//!
//! Does NOT handle:
//! - Key derivation (tested in section.rs).
//! - Source lookups and parsing (tested in the source module).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
