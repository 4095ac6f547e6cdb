//! URL slug derivation from post titles.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static NON_ALNUM_REGEX: OnceLock<Regex> = OnceLock::new();

/// Combining Diacritical Marks block, left behind by NFD on accented Latin letters
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Derive a URL-safe slug from a title.
///
/// Lower-cases, folds accented Latin letters to their base letter by dropping
/// combining diacritics (U+0300..U+036F) after NFD, maps the Vietnamese `đ` to
/// `d`, and collapses everything outside `[a-z0-9]` into single hyphens.
/// Returns an empty string when nothing usable is left.
///
/// # Example
/// ```
/// use post_seo_editor::slug::slugify;
/// assert_eq!(slugify("Đà Nẵng Spa"), "da-nang-spa");
/// ```
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect();

    let regex = NON_ALNUM_REGEX.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());

    regex
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

/// Whether `slug` is non-empty and already in normalized form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
