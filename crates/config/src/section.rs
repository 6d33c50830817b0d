//! The contract every configuration section satisfies.
//!
//! Responsibilities:
//! - Define the `Section` trait (key name, validity, presence, mandatory flag).
//! - Derive a section's key from its type name.
//! - Wrap typed sections into type-erased `Registration`s for the loader.
//!
//! Does NOT handle:
//! - Looking keys up in the source or binding values (see `loader::binder`).
//! - Environment overlay (see `loader::env`).
//!
//! Invariants:
//! - A derived key is the last path segment of the type name, without
//!   generic arguments, lower-cased.
//! - Explicit keys are lower-cased on registration; the source is case-insensitive.
//! - Binding writes source values over a section's current fields; fields the
//!   source omits keep their values, and the presence flag is never replaced.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::presence::Presence;
use crate::source::ConfigSource;

/// A typed configuration namespace bound from one top-level source key.
///
/// `Serialize` lets the binder merge source values over the section's
/// current fields instead of resetting the ones the source omits.
///
/// ```
/// use sectionconf::{Presence, Section};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Jwt {
///     port: u16,
///     url: String,
///     #[serde(skip)]
///     presence: Presence,
/// }
///
/// impl Section for Jwt {
///     fn presence(&self) -> &Presence {
///         &self.presence
///     }
///     fn presence_mut(&mut self) -> &mut Presence {
///         &mut self.presence
///     }
///     fn valid(&self) -> bool {
///         self.port != 0
///     }
/// }
///
/// assert_eq!(Jwt::key(), "jwt");
/// ```
pub trait Section: Serialize + DeserializeOwned {
    /// Top-level key this section binds from.
    fn key() -> String {
        derive_key(std::any::type_name::<Self>())
    }

    fn presence(&self) -> &Presence;

    fn presence_mut(&mut self) -> &mut Presence;

    /// Post-bind validation. Must be side-effect free.
    fn valid(&self) -> bool;

    /// Whether the key was present in the source when the section was bound.
    fn enabled(&self) -> bool {
        self.presence().enabled()
    }

    /// Mandatory sections fail the load when their key is absent.
    fn fail_when_missing(&self) -> bool {
        false
    }
}

/// Derive a section key from a fully qualified type name.
///
/// `my_app::config::ValidJWT` becomes `validjwt`; generic arguments and
/// reference markers are dropped.
pub fn derive_key(type_name: &str) -> String {
    let name = type_name.trim_start_matches('&').trim_start_matches("mut ");
    let name = name.split('<').next().unwrap_or(name);
    let name = name.rsplit("::").next().unwrap_or(name);
    name.to_lowercase()
}

/// Object-safe view of a section used by the binder.
pub(crate) trait Bindable {
    /// Deserialize the sub-tree at `key` over `self`, keeping the presence flag.
    fn bind_from(&mut self, source: &ConfigSource, key: &str) -> Result<(), toml::de::Error>;

    fn mark_enabled(&mut self);

    fn is_valid(&self) -> bool;

    fn is_mandatory(&self) -> bool;
}

impl<S: Section> Bindable for S {
    fn bind_from(&mut self, source: &ConfigSource, key: &str) -> Result<(), toml::de::Error> {
        let mut bound: S = source.unmarshal_key_over(key, &*self)?;
        *bound.presence_mut() = *self.presence();
        *self = bound;
        Ok(())
    }

    fn mark_enabled(&mut self) {
        self.presence_mut().mark_enabled();
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn is_mandatory(&self) -> bool {
        self.fail_when_missing()
    }
}

/// A section paired with the key it binds from, ready to pass to
/// [`ConfigLoader::load`](crate::ConfigLoader::load).
pub struct Registration<'a> {
    key: String,
    target: &'a mut dyn Bindable,
}

impl<'a> Registration<'a> {
    /// The lower-cased key this registration binds from.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn into_parts(self) -> (String, &'a mut dyn Bindable) {
        (self.key, self.target)
    }
}

impl std::fmt::Debug for Registration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Register a section under the key derived from its type.
pub fn section<S: Section>(target: &mut S) -> Registration<'_> {
    Registration {
        key: S::key().to_lowercase(),
        target,
    }
}

/// Register a section under an explicit key.
pub fn section_with_key<'a, S: Section>(target: &'a mut S, key: &str) -> Registration<'a> {
    Registration {
        key: key.to_lowercase(),
        target,
    }
}
