//! Post translation records as edited in the CMS and sent to its API.

use serde::{Deserialize, Serialize};

/// SEO metadata for one locale of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoFields {
    pub seo_title: String,
    pub seo_description: String,
    pub canonical: String,
    pub robots: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,

    /// Raw JSON-LD text as typed in the editor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_json: Option<String>,
}

/// One locale's editable record of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostTranslation {
    pub title: String,
    pub slug: String,
    pub excerpt: String,

    /// Rich text body (HTML)
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    pub seo: SeoFields,
}

impl PostTranslation {
    /// `seo_title` if filled in, otherwise the post title.
    pub fn effective_title(&self) -> &str {
        non_blank(&self.seo.seo_title).unwrap_or(&self.title)
    }

    /// `seo_description` if filled in, otherwise the excerpt.
    pub fn effective_description(&self) -> &str {
        non_blank(&self.seo.seo_description).unwrap_or(&self.excerpt)
    }

    /// Open Graph image, falling back to the thumbnail.
    pub fn effective_og_image(&self) -> Option<&str> {
        non_blank(&self.seo.og_image)
            .or_else(|| self.thumbnail_url.as_deref().and_then(non_blank))
    }
}

/// Partial update for a `PostTranslation`.
///
/// `None` leaves a field untouched. Optional fields take `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub thumbnail_url: Option<Option<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub schema_json: Option<Option<String>>,
}

impl TranslationPatch {
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn slug(mut self, value: impl Into<String>) -> Self {
        self.slug = Some(value.into());
        self
    }

    pub fn excerpt(mut self, value: impl Into<String>) -> Self {
        self.excerpt = Some(value.into());
        self
    }

    pub fn content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }

    pub fn seo_title(mut self, value: impl Into<String>) -> Self {
        self.seo_title = Some(value.into());
        self
    }

    pub fn seo_description(mut self, value: impl Into<String>) -> Self {
        self.seo_description = Some(value.into());
        self
    }

    pub fn canonical(mut self, value: impl Into<String>) -> Self {
        self.canonical = Some(value.into());
        self
    }

    pub fn robots(mut self, value: impl Into<String>) -> Self {
        self.robots = Some(value.into());
        self
    }

    pub fn og_image(mut self, value: impl Into<String>) -> Self {
        self.og_image = Some(value.into());
        self
    }

    pub fn schema_json(mut self, value: Option<&str>) -> Self {
        self.schema_json = Some(value.map(str::to_string));
        self
    }

    /// Write every set field into `target`.
    pub fn apply_to(self, target: &mut PostTranslation) {
        fn put<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        put(&mut target.title, self.title);
        put(&mut target.slug, self.slug);
        put(&mut target.excerpt, self.excerpt);
        put(&mut target.content, self.content);
        put(&mut target.thumbnail_url, self.thumbnail_url);

        let seo = &mut target.seo;
        put(&mut seo.seo_title, self.seo_title);
        put(&mut seo.seo_description, self.seo_description);
        put(&mut seo.canonical, self.canonical);
        put(&mut seo.robots, self.robots);
        put(&mut seo.og_title, self.og_title);
        put(&mut seo.og_description, self.og_description);
        put(&mut seo.og_image, self.og_image);
        put(&mut seo.schema_json, self.schema_json);
    }
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
