//! Locale type: a locale code that has been checked against the registry.

use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
///
/// Only `LocaleRegistry::resolve` hands these out, so a `Locale` in hand means
/// the code is one the site is configured for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locale {
    code: String,
}

impl Locale {
    pub(crate) fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }

    /// Get the locale code (e.g., "en", "vi").
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}
