//! In-memory translation state for the post being edited.
//!
//! Holds one `PostTranslation` per locale. The store does not validate
//! anything; callers run the scorer or the schema validator against a snapshot
//! of a locale when they need to.

use crate::i18n::{Locale, LocaleRegistry, RegistryError};
use crate::post::{PostTranslation, TranslationPatch};
use crate::seo::{self, SeoAnalysis, SeoPolicy};
use crate::slug::slugify;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Mapping from locale to that locale's record.
pub type TranslationsByLang = BTreeMap<Locale, PostTranslation>;

/// On-disk post document: `{ "translations": { "<code>": { ... } } }`
#[derive(Debug, Deserialize)]
struct PostFile {
    translations: BTreeMap<String, PostTranslation>,
}

/// Editable translations of a single post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationStore {
    translations: TranslationsByLang,

    /// Locales whose slug was typed by the user and no longer follows the title
    slug_overrides: BTreeSet<Locale>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load translations keyed by raw locale code, rejecting unsupported codes.
    ///
    /// A stored slug that differs from the slug of its title is treated as a
    /// user override.
    ///
    /// # Returns
    /// * `Ok(TranslationStore)` if every code is supported
    /// * `Err(RegistryError::Unsupported)` for the first unknown code
    pub fn from_codes(
        registry: &LocaleRegistry,
        translations: BTreeMap<String, PostTranslation>,
    ) -> Result<Self, RegistryError> {
        let translations = translations
            .into_iter()
            .map(|(code, post)| Ok((registry.resolve(&code)?, post)))
            .collect::<Result<TranslationsByLang, RegistryError>>()?;

        let slug_overrides = translations
            .iter()
            .filter(|(_, post)| !post.slug.is_empty() && post.slug != slugify(&post.title))
            .map(|(locale, _)| locale.clone())
            .collect();

        Ok(Self {
            translations,
            slug_overrides,
        })
    }

    /// Read a post document in JSON form.
    ///
    /// # Arguments
    /// * `reader` - Source of `{ "translations": { "<code>": PostTranslation } }`
    /// * `registry` - Supported locales; any other code is an error
    pub fn from_reader<R: Read>(reader: R, registry: &LocaleRegistry) -> Result<Self> {
        let file: PostFile =
            serde_json::from_reader(reader).context("Failed to parse post document")?;
        Ok(Self::from_codes(registry, file.translations)?)
    }

    /// Load a post document from a JSON file.
    pub fn load(path: impl AsRef<Path>, registry: &LocaleRegistry) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let store = Self::from_reader(BufReader::new(file), registry)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        debug!("Loaded {} translation(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Get the record for one locale.
    ///
    /// # Returns
    /// * `Some(&PostTranslation)` if the locale has a record
    /// * `None` if its editor tab was never opened
    pub fn get(&self, locale: &Locale) -> Option<&PostTranslation> {
        self.translations.get(locale)
    }

    /// Owned copy of one locale's record, for validation or scoring.
    pub fn snapshot(&self, locale: &Locale) -> Option<PostTranslation> {
        self.translations.get(locale).cloned()
    }

    /// Get the record for `locale`, creating an empty one if absent.
    pub fn ensure(&mut self, locale: &Locale) -> &mut PostTranslation {
        self.translations.entry(locale.clone()).or_insert_with(|| {
            debug!("Adding empty translation for locale {}", locale);
            PostTranslation::default()
        })
    }

    /// Apply a partial update to one locale, creating the record if needed.
    ///
    /// A non-empty `slug` in the patch marks the slug as overridden and an
    /// empty one clears the override. Until overridden, a new title re-derives
    /// the slug.
    pub fn set(&mut self, locale: &Locale, patch: TranslationPatch) {
        match patch.slug.as_deref() {
            Some("") => {
                self.slug_overrides.remove(locale);
            }
            Some(_) => {
                self.slug_overrides.insert(locale.clone());
            }
            None => {}
        }

        let derived_slug = match &patch.title {
            Some(title) if !self.slug_overrides.contains(locale) && patch.slug.is_none() => {
                Some(slugify(title))
            }
            _ => None,
        };

        let post = self.ensure(locale);
        patch.apply_to(post);

        if let Some(slug) = derived_slug {
            post.slug = slug;
        }
    }

    /// Whether the user has typed a slug for `locale`.
    pub fn is_slug_overridden(&self, locale: &Locale) -> bool {
        self.slug_overrides.contains(locale)
    }

    /// Drop a locale's record (closing its editor tab).
    pub fn remove(&mut self, locale: &Locale) -> Option<PostTranslation> {
        self.slug_overrides.remove(locale);
        let removed = self.translations.remove(locale);
        if removed.is_some() {
            debug!("Removed translation for locale {}", locale);
        }
        removed
    }

    /// Locales with a record, in code order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.translations.keys()
    }

    /// The whole locale-to-record mapping, for saving.
    pub fn translations(&self) -> &TranslationsByLang {
        &self.translations
    }

    /// `true` if no locale has a record yet.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Number of locales with a record.
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Score one locale's current record.
    pub fn analyze(&self, locale: &Locale, policy: &SeoPolicy) -> Option<SeoAnalysis> {
        self.get(locale).map(|post| seo::analyze(post, policy))
    }
}
