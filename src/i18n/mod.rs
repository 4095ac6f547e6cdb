//! Locale support for the post editor.
//!
//! # Architecture
//!
//! - `registry`: the configured set of supported locales and the default one
//! - `locale`: `Locale`, a code validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use post_seo_editor::i18n::{LocaleConfig, LocaleRegistry};
//!
//! let registry = LocaleRegistry::new(vec![
//!     LocaleConfig::new("en", "English", true),
//!     LocaleConfig::new("vi", "Tiếng Việt", false),
//! ])?;
//! let vi = registry.resolve("vi")?;
//! ```

mod locale;
mod registry;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry, RegistryError};
