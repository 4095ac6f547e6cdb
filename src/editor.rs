//! Save gating for the post editor.
//!
//! Before a post is sent to the CMS every locale is checked: the title must be
//! filled in, the slug must be usable, and the JSON-LD block must parse. Each
//! problem names the editor section the user has to jump to.

use crate::i18n::{Locale, LocaleRegistry};
use crate::post::PostTranslation;
use crate::schema::{parse_schema_json, Notify, SchemaJson};
use crate::seo::SeoRule;
use crate::slug::{is_valid_slug, slugify};
use crate::store::TranslationStore;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Editor panels, in the order they appear in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorSection {
    Content,
    Seo,
    OpenGraph,
    StructuredData,
}

impl EditorSection {
    /// The panel holding the fields an SEO rule looks at.
    pub fn for_rule(rule: SeoRule) -> Self {
        match rule {
            SeoRule::SlugFormat | SeoRule::SlugMatchesTitle | SeoRule::ContentLength => {
                EditorSection::Content
            }
            SeoRule::TitleLength
            | SeoRule::DescriptionLength
            | SeoRule::CanonicalUrl
            | SeoRule::Indexable => EditorSection::Seo,
            SeoRule::OpenGraphText | SeoRule::OpenGraphImage => EditorSection::OpenGraph,
            SeoRule::StructuredData => EditorSection::StructuredData,
        }
    }
}

impl fmt::Display for EditorSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorSection::Content => "content",
            EditorSection::Seo => "seo",
            EditorSection::OpenGraph => "open graph",
            EditorSection::StructuredData => "structured data",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Partial locale coverage is fine
    Draft,

    /// Every supported locale must be present
    Publish,
}

/// One problem blocking the save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub locale: Locale,
    pub section: EditorSection,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.locale, self.section, self.message)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("post has no translations")]
    Empty,

    #[error("missing translations for: {}", join_codes(.0))]
    MissingLocales(Vec<Locale>),

    #[error("{} issue(s) block saving: {}", .0.len(), join_issues(.0))]
    Invalid(Vec<FieldIssue>),
}

impl SaveError {
    /// Where the editor should navigate to fix the first problem.
    ///
    /// Issues are collected in locale order and, within a locale, in section
    /// order, so the first one is the topmost.
    pub fn first_section(&self) -> Option<(&Locale, EditorSection)> {
        match self {
            SaveError::Invalid(issues) => issues
                .first()
                .map(|issue| (&issue.locale, issue.section)),
            SaveError::MissingLocales(locales) => {
                locales.first().map(|locale| (locale, EditorSection::Content))
            }
            SaveError::Empty => None,
        }
    }
}

fn join_codes(locales: &[Locale]) -> String {
    locales
        .iter()
        .map(Locale::code)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// SEO block as persisted, with structured data parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoPayload {
    pub seo_title: String,
    pub seo_description: String,
    pub canonical: String,
    pub robots: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_json: Option<Map<String, Value>>,
}

/// One locale as persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPayload {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub seo: SeoPayload,
}

/// The whole post as sent to the content API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDocument {
    pub status: SaveMode,
    pub translations: BTreeMap<Locale, TranslationPayload>,
}

/// Check every locale in `store` and build the document to persist.
///
/// Invalid JSON-LD is reported through `notify` (once per offending locale).
pub fn prepare_save<N: Notify + ?Sized>(
    store: &TranslationStore,
    registry: &LocaleRegistry,
    mode: SaveMode,
    notify: &mut N,
) -> Result<PostDocument, SaveError> {
    if store.is_empty() {
        return Err(SaveError::Empty);
    }

    if mode == SaveMode::Publish {
        let missing = registry.missing(store);
        if !missing.is_empty() {
            warn!("Publish blocked, missing locales: {}", join_codes(&missing));
            return Err(SaveError::MissingLocales(missing));
        }
    }

    let mut issues = Vec::new();
    let mut translations = BTreeMap::new();

    for (locale, post) in store.translations() {
        if let Some(payload) = check_translation(locale, post, &mut *notify, &mut issues) {
            translations.insert(locale.clone(), payload);
        }
    }

    if !issues.is_empty() {
        warn!("Save blocked by {} issue(s)", issues.len());
        return Err(SaveError::Invalid(issues));
    }

    info!(
        "Prepared {:?} document with {} translation(s)",
        mode,
        translations.len()
    );
    Ok(PostDocument {
        status: mode,
        translations,
    })
}

fn check_translation<N: Notify + ?Sized>(
    locale: &Locale,
    post: &PostTranslation,
    notify: &mut N,
    issues: &mut Vec<FieldIssue>,
) -> Option<TranslationPayload> {
    let before = issues.len();
    let mut issue = |section: EditorSection, message: &str| {
        issues.push(FieldIssue {
            locale: locale.clone(),
            section,
            message: message.to_string(),
        })
    };

    let title = post.title.trim();
    if title.is_empty() {
        issue(EditorSection::Content, "title is required");
    }

    // An empty slug is re-derived from the title; anything else must already be clean
    let slug = if post.slug.is_empty() {
        slugify(title)
    } else {
        post.slug.clone()
    };
    if !title.is_empty() && !is_valid_slug(&slug) {
        issue(
            EditorSection::Content,
            "slug must contain only lowercase letters, digits and hyphens",
        );
    }

    let schema_json = match parse_schema_json(post.seo.schema_json.as_deref(), notify) {
        SchemaJson::Invalid => {
            issue(
                EditorSection::StructuredData,
                "structured data must be a JSON object",
            );
            None
        }
        other => other.into_object(),
    };

    if issues.len() > before {
        return None;
    }

    Some(TranslationPayload {
        title: title.to_string(),
        slug,
        excerpt: post.excerpt.clone(),
        content: post.content.clone(),
        thumbnail_url: post.thumbnail_url.clone(),
        seo: SeoPayload {
            seo_title: post.seo.seo_title.clone(),
            seo_description: post.seo.seo_description.clone(),
            canonical: post.seo.canonical.clone(),
            robots: post.seo.robots.clone(),
            og_title: post.seo.og_title.clone(),
            og_description: post.seo.og_description.clone(),
            og_image: post.seo.og_image.clone(),
            schema_json,
        },
    })
}
