//! Locale registry: single source of truth for the locales a post can be edited in.
//!
//! The registry is built once at process start from configuration and handed to
//! consumers by reference. There is no global instance.

use crate::i18n::Locale;
use crate::store::TranslationStore;
use std::collections::HashSet;
use thiserror::Error;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Short locale code (e.g., "en", "vi")
    pub code: String,

    /// Display name shown on the editor tab (e.g., "English", "Tiếng Việt")
    pub name: String,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

impl LocaleConfig {
    pub fn new(code: impl Into<String>, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            is_default,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no locales configured")]
    Empty,

    #[error("locale code must not be blank")]
    BlankCode,

    #[error("duplicate locale code: '{0}'")]
    Duplicate(String),

    #[error("no default locale configured")]
    NoDefault,

    #[error("multiple default locales configured: {0:?}")]
    MultipleDefaults(Vec<String>),

    #[error("unsupported locale code: '{0}'")]
    Unsupported(String),
}

/// The validated set of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

impl LocaleRegistry {
    /// Build a registry, checking that codes are unique and non-blank and that
    /// exactly one locale is the default.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self, RegistryError> {
        if locales.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for locale in &locales {
            if locale.code.trim().is_empty() {
                return Err(RegistryError::BlankCode);
            }
            if !seen.insert(locale.code.as_str()) {
                return Err(RegistryError::Duplicate(locale.code.clone()));
            }
        }

        let defaults: Vec<String> = locales
            .iter()
            .filter(|locale| locale.is_default)
            .map(|locale| locale.code.clone())
            .collect();

        match defaults.len() {
            0 => Err(RegistryError::NoDefault),
            1 => Ok(Self { locales }),
            _ => Err(RegistryError::MultipleDefaults(defaults)),
        }
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Resolve a code into a `Locale` handle.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is supported
    /// * `Err(RegistryError::Unsupported)` otherwise
    pub fn resolve(&self, code: &str) -> Result<Locale, RegistryError> {
        self.get_by_code(code)
            .map(|config| Locale::new(&config.code))
            .ok_or_else(|| RegistryError::Unsupported(code.to_string()))
    }

    /// All configured locales, in configuration order.
    pub fn list(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// All supported locales as handles, in configuration order.
    pub fn locales(&self) -> Vec<Locale> {
        self.locales
            .iter()
            .map(|config| Locale::new(&config.code))
            .collect()
    }

    /// The default locale (the first editor tab).
    pub fn default_locale(&self) -> Locale {
        // `new` guarantees exactly one default
        let config = self
            .locales
            .iter()
            .find(|locale| locale.is_default)
            .unwrap_or(&self.locales[0]);
        Locale::new(&config.code)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Supported locales that have no entry in the store yet.
    pub fn missing(&self, store: &TranslationStore) -> Vec<Locale> {
        self.locales()
            .into_iter()
            .filter(|locale| store.get(locale).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_vi() -> Vec<LocaleConfig> {
        vec![
            LocaleConfig::new("en", "English", true),
            LocaleConfig::new("vi", "Tiếng Việt", false),
        ]
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_accepts_valid_locales() {
        let registry = LocaleRegistry::new(en_vi()).expect("Should build");
        assert_eq!(registry.list().len(), 2);
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(LocaleRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_new_rejects_blank_code() {
        let locales = vec![LocaleConfig::new("  ", "Blank", true)];
        assert_eq!(
            LocaleRegistry::new(locales).unwrap_err(),
            RegistryError::BlankCode
        );
    }

    #[test]
    fn test_new_rejects_duplicate_code() {
        let mut locales = en_vi();
        locales.push(LocaleConfig::new("vi", "Vietnamese again", false));
        assert_eq!(
            LocaleRegistry::new(locales).unwrap_err(),
            RegistryError::Duplicate("vi".to_string())
        );
    }

    #[test]
    fn test_new_rejects_missing_default() {
        let locales = vec![
            LocaleConfig::new("en", "English", false),
            LocaleConfig::new("vi", "Tiếng Việt", false),
        ];
        assert_eq!(
            LocaleRegistry::new(locales).unwrap_err(),
            RegistryError::NoDefault
        );
    }

    #[test]
    fn test_new_rejects_multiple_defaults() {
        let locales = vec![
            LocaleConfig::new("en", "English", true),
            LocaleConfig::new("vi", "Tiếng Việt", true),
        ];
        let err = LocaleRegistry::new(locales).unwrap_err();
        assert!(err.to_string().contains("multiple default"));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_resolve_supported() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        let vi = registry.resolve("vi").expect("Should resolve");
        assert_eq!(vi.code(), "vi");
    }

    #[test]
    fn test_resolve_unsupported() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        let err = registry.resolve("fr").unwrap_err();
        assert_eq!(err, RegistryError::Unsupported("fr".to_string()));
        assert!(err.to_string().contains("'fr'"));
    }

    #[test]
    fn test_default_locale() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        assert_eq!(registry.default_locale().code(), "en");
    }

    #[test]
    fn test_is_supported() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        assert!(registry.is_supported("en"));
        assert!(registry.is_supported("vi"));
        assert!(!registry.is_supported("fr"));
    }

    #[test]
    fn test_locales_keep_configuration_order() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        let codes: Vec<_> = registry.locales().iter().map(|l| l.code().to_string()).collect();
        assert_eq!(codes, vec!["en", "vi"]);
    }

    #[test]
    fn test_missing_reports_locales_without_entries() {
        let registry = LocaleRegistry::new(en_vi()).unwrap();
        let mut store = TranslationStore::new();
        store.ensure(&registry.resolve("en").unwrap());

        let missing = registry.missing(&store);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].code(), "vi");
    }
}
