use crate::i18n::{LocaleConfig, LocaleRegistry};
use crate::seo::SeoPolicy;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Locales: (code, display name) in tab order
    pub supported_locales: Vec<(String, String)>,
    pub default_locale: String,

    // SEO thresholds
    pub seo: SeoPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_locales = parse_locales(
            &std::env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en,vi".to_string()),
        );
        if supported_locales.is_empty() {
            bail!("SUPPORTED_LOCALES must list at least one locale");
        }

        let default_locale = std::env::var("DEFAULT_LOCALE")
            .unwrap_or_else(|_| supported_locales[0].0.clone());

        let defaults = SeoPolicy::default();
        Ok(Self {
            supported_locales,
            default_locale,

            seo: SeoPolicy {
                min_title_chars: env_or("SEO_MIN_TITLE_CHARS", defaults.min_title_chars),
                max_title_chars: env_or("SEO_MAX_TITLE_CHARS", defaults.max_title_chars),
                min_description_chars: env_or(
                    "SEO_MIN_DESCRIPTION_CHARS",
                    defaults.min_description_chars,
                ),
                max_description_chars: env_or(
                    "SEO_MAX_DESCRIPTION_CHARS",
                    defaults.max_description_chars,
                ),
                min_content_words: env_or("SEO_MIN_CONTENT_WORDS", defaults.min_content_words),
            },
        })
    }

    /// Build the locale registry. Called once at startup; the result is passed
    /// by reference to everything that needs it.
    pub fn locale_registry(&self) -> Result<LocaleRegistry> {
        let locales = self
            .supported_locales
            .iter()
            .map(|(code, name)| LocaleConfig::new(code, name, *code == self.default_locale))
            .collect();

        LocaleRegistry::new(locales).with_context(|| {
            format!(
                "invalid locale configuration (DEFAULT_LOCALE={})",
                self.default_locale
            )
        })
    }
}

fn env_or(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse `"en=English,vi=Tiếng Việt"`; a bare code uses itself as the name.
fn parse_locales(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((code, name)) => (code.trim().to_string(), name.trim().to_string()),
            None => (entry.to_string(), entry.to_string()),
        })
        .collect()
}
