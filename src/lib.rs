//! Core of a multi-locale CMS post editor.
//!
//! - `store`: per-locale translation state for the post being edited
//! - `slug`: URL slug derivation
//! - `schema`: JSON-LD structured data validation
//! - `seo`: rule-based SEO scoring
//! - `editor`: save/publish gating over every locale
//! - `i18n`: supported locales
//! - `config`: environment-driven configuration

pub mod config;
pub mod editor;
pub mod i18n;
pub mod post;
pub mod schema;
pub mod seo;
pub mod slug;
pub mod store;
