//! Rule-based SEO scoring for a single post translation.
//!
//! Every rule is evaluated in a fixed order and produces one `SeoCheck`. The
//! score is the weighted share of passing rules, scaled to 0..=100. Scoring is
//! pure: it reads only the translation and the policy it is given.

use crate::post::{non_blank, PostTranslation};
use crate::schema::{classify_schema_json, SchemaJson};
use crate::slug::{is_valid_slug, slugify};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static ABSOLUTE_URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Thresholds used by the length-based rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoPolicy {
    pub min_title_chars: usize,
    pub max_title_chars: usize,
    pub min_description_chars: usize,
    pub max_description_chars: usize,
    pub min_content_words: usize,
}

impl Default for SeoPolicy {
    fn default() -> Self {
        Self {
            min_title_chars: 30,
            max_title_chars: 60,
            min_description_chars: 70,
            max_description_chars: 160,
            min_content_words: 300,
        }
    }
}

/// Identifier of one SEO rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoRule {
    TitleLength,
    DescriptionLength,
    SlugFormat,
    SlugMatchesTitle,
    CanonicalUrl,
    Indexable,
    OpenGraphText,
    OpenGraphImage,
    ContentLength,
    StructuredData,
}

impl SeoRule {
    /// All rules in evaluation (and display) order.
    pub const ALL: [SeoRule; 10] = [
        SeoRule::TitleLength,
        SeoRule::DescriptionLength,
        SeoRule::SlugFormat,
        SeoRule::SlugMatchesTitle,
        SeoRule::CanonicalUrl,
        SeoRule::Indexable,
        SeoRule::OpenGraphText,
        SeoRule::OpenGraphImage,
        SeoRule::ContentLength,
        SeoRule::StructuredData,
    ];

    /// Relative weight of the rule in the score.
    pub fn weight(self) -> u32 {
        match self {
            SeoRule::TitleLength | SeoRule::DescriptionLength => 3,
            SeoRule::SlugFormat | SeoRule::Indexable | SeoRule::ContentLength => 2,
            SeoRule::SlugMatchesTitle
            | SeoRule::CanonicalUrl
            | SeoRule::OpenGraphText
            | SeoRule::OpenGraphImage
            | SeoRule::StructuredData => 1,
        }
    }
}

/// One evaluated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoCheck {
    pub rule: SeoRule,
    pub label: String,
    pub ok: bool,

    /// How to fix the problem; only present when the check fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SeoCheck {
    fn new(rule: SeoRule, label: impl Into<String>, ok: bool, hint: impl Into<String>) -> Self {
        Self {
            rule,
            label: label.into(),
            ok,
            hint: if ok { None } else { Some(hint.into()) },
        }
    }
}

/// Coarse rating for the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeoGrade {
    Good,
    NeedsWork,
    Poor,
}

/// Score and per-rule diagnostics for one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoAnalysis {
    /// 0..=100
    pub score: u8,
    pub checks: Vec<SeoCheck>,
}

impl SeoAnalysis {
    /// Checks that passed, in rule order.
    pub fn passed(&self) -> impl Iterator<Item = &SeoCheck> {
        self.checks.iter().filter(|check| check.ok)
    }

    /// Checks that failed, in rule order. Each carries a hint.
    pub fn failed(&self) -> impl Iterator<Item = &SeoCheck> {
        self.checks.iter().filter(|check| !check.ok)
    }

    /// Bucket the score for display.
    ///
    /// # Returns
    /// * `SeoGrade::Good` for 80 and above
    /// * `SeoGrade::NeedsWork` for 50-79
    /// * `SeoGrade::Poor` below 50
    pub fn grade(&self) -> SeoGrade {
        match self.score {
            80..=100 => SeoGrade::Good,
            50..=79 => SeoGrade::NeedsWork,
            _ => SeoGrade::Poor,
        }
    }
}

/// Evaluate every rule against `post`.
pub fn analyze(post: &PostTranslation, policy: &SeoPolicy) -> SeoAnalysis {
    let checks: Vec<SeoCheck> = SeoRule::ALL
        .iter()
        .map(|rule| evaluate(*rule, post, policy))
        .collect();

    SeoAnalysis {
        score: weighted_score(&checks),
        checks,
    }
}

fn evaluate(rule: SeoRule, post: &PostTranslation, policy: &SeoPolicy) -> SeoCheck {
    match rule {
        SeoRule::TitleLength => {
            let len = post.effective_title().trim().chars().count();
            SeoCheck::new(
                rule,
                format!(
                    "Meta title is {}-{} characters",
                    policy.min_title_chars, policy.max_title_chars
                ),
                (policy.min_title_chars..=policy.max_title_chars).contains(&len),
                format!(
                    "Meta title has {} characters; aim for {}-{}",
                    len, policy.min_title_chars, policy.max_title_chars
                ),
            )
        }
        SeoRule::DescriptionLength => {
            let len = post.seo.seo_description.trim().chars().count();
            let hint = if len == 0 {
                "Add a meta description summarising the post".to_string()
            } else {
                format!(
                    "Meta description has {} characters; aim for {}-{}",
                    len, policy.min_description_chars, policy.max_description_chars
                )
            };
            SeoCheck::new(
                rule,
                format!(
                    "Meta description is {}-{} characters",
                    policy.min_description_chars, policy.max_description_chars
                ),
                (policy.min_description_chars..=policy.max_description_chars).contains(&len),
                hint,
            )
        }
        SeoRule::SlugFormat => SeoCheck::new(
            rule,
            "Slug is URL-safe",
            is_valid_slug(&post.slug),
            "Use lowercase letters, digits and single hyphens only",
        ),
        SeoRule::SlugMatchesTitle => {
            let expected = slugify(&post.title);
            SeoCheck::new(
                rule,
                "Slug matches the title",
                !expected.is_empty() && post.slug == expected,
                format!("Consider using the slug \"{}\"", expected),
            )
        }
        SeoRule::CanonicalUrl => SeoCheck::new(
            rule,
            "Canonical URL is set",
            is_absolute_url(&post.seo.canonical),
            "Set the canonical URL to the absolute http(s) address of this page",
        ),
        SeoRule::Indexable => SeoCheck::new(
            rule,
            "Page can be indexed",
            !post.seo.robots.to_ascii_lowercase().contains("noindex"),
            "Remove \"noindex\" from the robots directive to appear in search results",
        ),
        SeoRule::OpenGraphText => {
            let title =
                non_blank(&post.seo.og_title).or_else(|| non_blank(post.effective_title()));
            let description = non_blank(&post.seo.og_description)
                .or_else(|| non_blank(post.effective_description()));
            SeoCheck::new(
                rule,
                "Open Graph title and description are available",
                title.is_some() && description.is_some(),
                "Fill in the Open Graph title and description for social sharing",
            )
        }
        SeoRule::OpenGraphImage => SeoCheck::new(
            rule,
            "Open Graph image is set",
            post.effective_og_image().is_some(),
            "Add an Open Graph image or a thumbnail",
        ),
        SeoRule::ContentLength => {
            let words = word_count(&post.content);
            SeoCheck::new(
                rule,
                format!("Content has at least {} words", policy.min_content_words),
                words >= policy.min_content_words,
                format!(
                    "Content has {} words; add at least {} more",
                    words,
                    policy.min_content_words.saturating_sub(words)
                ),
            )
        }
        SeoRule::StructuredData => {
            let (ok, hint) = match classify_schema_json(post.seo.schema_json.as_deref()) {
                SchemaJson::Valid(_) => (true, ""),
                SchemaJson::Absent => (false, "Add JSON-LD structured data (e.g. an Article)"),
                SchemaJson::Invalid => (false, "Fix the structured data: it must be a JSON object"),
            };
            SeoCheck::new(rule, "Structured data is valid", ok, hint)
        }
    }
}

fn weighted_score(checks: &[SeoCheck]) -> u8 {
    let total: u32 = checks.iter().map(|check| check.rule.weight()).sum();
    if total == 0 {
        return 0;
    }
    let passed: u32 = checks
        .iter()
        .filter(|check| check.ok)
        .map(|check| check.rule.weight())
        .sum();

    // Round half up; passed <= total keeps this within 0..=100
    ((passed * 100 + total / 2) / total) as u8
}

fn is_absolute_url(value: &str) -> bool {
    let regex =
        ABSOLUTE_URL_REGEX.get_or_init(|| Regex::new(r"(?i)^https?://[^\s/?#]+[^\s]*$").unwrap());
    regex.is_match(value.trim())
}

/// Words of visible text in an HTML fragment.
fn word_count(html: &str) -> usize {
    let regex = HTML_TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    regex
        .replace_all(html, " ")
        .replace("&nbsp;", " ")
        .split_whitespace()
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::SeoFields;
    use proptest::prelude::*;

    fn well_optimized() -> PostTranslation {
        PostTranslation {
            title: "Relaxing Hot Stone Massage in Da Nang".to_string(),
            slug: "relaxing-hot-stone-massage-in-da-nang".to_string(),
            excerpt: "A guide to our signature treatment.".to_string(),
            content: format!("<p>{}</p>", "word ".repeat(320)),
            thumbnail_url: None,
            seo: SeoFields {
                seo_title: String::new(),
                seo_description: concat!(
                    "Book a hot stone massage in Da Nang: what to expect, ",
                    "how long it takes and how to prepare for your visit."
                )
                .to_string(),
                canonical: "https://spa.example.com/blog/relaxing-hot-stone-massage-in-da-nang"
                    .to_string(),
                robots: "index, follow".to_string(),
                og_title: String::new(),
                og_description: String::new(),
                og_image: "https://cdn.example.com/hot-stone.jpg".to_string(),
                schema_json: Some(
                    r#"{"@context":"https://schema.org","@type":"Article"}"#.to_string(),
                ),
            },
        }
    }

    fn check(analysis: &SeoAnalysis, rule: SeoRule) -> &SeoCheck {
        analysis
            .checks
            .iter()
            .find(|check| check.rule == rule)
            .expect("Every rule should produce a check")
    }

    // ==================== Aggregate Tests ====================

    #[test]
    fn test_well_optimized_post_scores_100() {
        let analysis = analyze(&well_optimized(), &SeoPolicy::default());
        let failed: Vec<_> = analysis.failed().map(|c| c.rule).collect();
        assert!(failed.is_empty(), "unexpected failures: {:?}", failed);
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.grade(), SeoGrade::Good);
    }

    #[test]
    fn test_empty_post_scores_low_without_panicking() {
        let analysis = analyze(&PostTranslation::default(), &SeoPolicy::default());
        assert_eq!(analysis.checks.len(), SeoRule::ALL.len());
        // Only "indexable" passes on an empty record
        assert_eq!(analysis.passed().count(), 1);
        assert!(check(&analysis, SeoRule::Indexable).ok);
        assert_eq!(analysis.grade(), SeoGrade::Poor);
    }

    #[test]
    fn test_checks_follow_rule_order() {
        let analysis = analyze(&PostTranslation::default(), &SeoPolicy::default());
        let rules: Vec<_> = analysis.checks.iter().map(|c| c.rule).collect();
        assert_eq!(rules, SeoRule::ALL.to_vec());
    }

    #[test]
    fn test_hint_only_on_failure() {
        let analysis = analyze(&PostTranslation::default(), &SeoPolicy::default());
        for check in &analysis.checks {
            assert_eq!(check.hint.is_some(), !check.ok, "rule {:?}", check.rule);
        }
    }

    #[test]
    fn test_fixing_fields_never_lowers_score() {
        let policy = SeoPolicy::default();
        let target = well_optimized();
        let mut post = PostTranslation::default();
        let mut last = analyze(&post, &policy).score;

        let steps: Vec<Box<dyn Fn(&mut PostTranslation)>> = vec![
            Box::new(|p: &mut PostTranslation| p.title = target.title.clone()),
            Box::new(|p: &mut PostTranslation| p.slug = target.slug.clone()),
            Box::new(|p: &mut PostTranslation| {
                p.seo.seo_description = target.seo.seo_description.clone()
            }),
            Box::new(|p: &mut PostTranslation| p.seo.canonical = target.seo.canonical.clone()),
            Box::new(|p: &mut PostTranslation| p.seo.og_image = target.seo.og_image.clone()),
            Box::new(|p: &mut PostTranslation| p.content = target.content.clone()),
            Box::new(|p: &mut PostTranslation| p.seo.schema_json = target.seo.schema_json.clone()),
        ];

        for step in steps {
            step(&mut post);
            let score = analyze(&post, &policy).score;
            assert!(score >= last, "score dropped from {} to {}", last, score);
            last = score;
        }
        assert_eq!(last, 100);
    }

    // ==================== Rule Tests ====================

    #[test]
    fn test_title_length_uses_seo_title_when_present() {
        let mut post = well_optimized();
        post.seo.seo_title = "Too short".to_string();
        let analysis = analyze(&post, &SeoPolicy::default());
        let title = check(&analysis, SeoRule::TitleLength);
        assert!(!title.ok);
        assert!(title.hint.as_ref().unwrap().contains("9 characters"));
    }

    #[test]
    fn test_title_length_counts_characters_not_bytes() {
        let mut post = well_optimized();
        // 30 characters, far more bytes
        post.title = "Đà Nẵng ".repeat(4).chars().take(30).collect();
        assert_eq!(post.title.chars().count(), 30);
        let analysis = analyze(&post, &SeoPolicy::default());
        assert!(check(&analysis, SeoRule::TitleLength).ok);
    }

    #[test]
    fn test_description_missing_hint() {
        let mut post = well_optimized();
        post.seo.seo_description.clear();
        let analysis = analyze(&post, &SeoPolicy::default());
        let description = check(&analysis, SeoRule::DescriptionLength);
        assert!(!description.ok);
        assert!(description.hint.as_ref().unwrap().contains("Add a meta description"));
    }

    #[test]
    fn test_slug_override_fails_match_but_passes_format() {
        let mut post = well_optimized();
        post.slug = "hot-stone".to_string();
        let analysis = analyze(&post, &SeoPolicy::default());
        assert!(check(&analysis, SeoRule::SlugFormat).ok);
        let matches = check(&analysis, SeoRule::SlugMatchesTitle);
        assert!(!matches.ok);
        assert!(matches.hint.as_ref().unwrap().contains("relaxing-hot-stone-massage-in-da-nang"));
    }

    #[test]
    fn test_relative_canonical_fails() {
        let mut post = well_optimized();
        post.seo.canonical = "/blog/hot-stone".to_string();
        let analysis = analyze(&post, &SeoPolicy::default());
        assert!(!check(&analysis, SeoRule::CanonicalUrl).ok);
    }

    #[test]
    fn test_noindex_fails_case_insensitively() {
        let mut post = well_optimized();
        post.seo.robots = "NOINDEX, follow".to_string();
        let analysis = analyze(&post, &SeoPolicy::default());
        assert!(!check(&analysis, SeoRule::Indexable).ok);
    }

    #[test]
    fn test_og_image_falls_back_to_thumbnail() {
        let mut post = well_optimized();
        post.seo.og_image.clear();
        post.thumbnail_url = Some("https://cdn.example.com/thumb.jpg".to_string());
        let analysis = analyze(&post, &SeoPolicy::default());
        assert!(check(&analysis, SeoRule::OpenGraphImage).ok);
    }

    #[test]
    fn test_content_words_ignore_markup() {
        assert_eq!(word_count("<p>Hello&nbsp;<strong>spa</strong> world</p>"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_invalid_schema_fails_structured_data() {
        let mut post = well_optimized();
        post.seo.schema_json = Some("[1,2,3]".to_string());
        let analysis = analyze(&post, &SeoPolicy::default());
        let structured = check(&analysis, SeoRule::StructuredData);
        assert!(!structured.ok);
        assert!(structured.hint.as_ref().unwrap().contains("JSON object"));
    }

    #[test]
    fn test_custom_policy_thresholds() {
        let policy = SeoPolicy {
            min_content_words: 5,
            ..SeoPolicy::default()
        };
        let mut post = well_optimized();
        post.content = "<p>one two three four five</p>".to_string();
        let analysis = analyze(&post, &policy);
        assert!(check(&analysis, SeoRule::ContentLength).ok);
    }

    // ==================== Property Tests ====================

    fn arb_post() -> impl Strategy<Value = PostTranslation> {
        (
            ".{0,80}",
            "[a-z0-9-]{0,40}",
            ".{0,200}",
            prop::option::of(".{0,40}"),
            ".{0,60}",
            ".{0,60}",
        )
            .prop_map(|(title, slug, description, schema, canonical, robots)| {
                let mut post = PostTranslation {
                    title,
                    slug,
                    ..Default::default()
                };
                post.seo.seo_description = description;
                post.seo.schema_json = schema;
                post.seo.canonical = canonical;
                post.seo.robots = robots;
                post
            })
    }

    proptest! {
        #[test]
        fn prop_analyze_is_pure(post in arb_post()) {
            let policy = SeoPolicy::default();
            let first = analyze(&post, &policy);
            let second = analyze(&post, &policy);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_score_in_range(post in arb_post()) {
            let analysis = analyze(&post, &SeoPolicy::default());
            prop_assert!(analysis.score <= 100);
        }

        #[test]
        fn prop_passing_more_checks_never_lowers_score(
            outcomes in prop::collection::vec(any::<bool>(), SeoRule::ALL.len()),
            flip in 0usize..SeoRule::ALL.len(),
        ) {
            let checks: Vec<SeoCheck> = SeoRule::ALL
                .iter()
                .zip(&outcomes)
                .map(|(rule, ok)| SeoCheck::new(*rule, "", *ok, ""))
                .collect();
            let mut improved = checks.clone();
            improved[flip].ok = true;
            prop_assert!(weighted_score(&improved) >= weighted_score(&checks));
        }
    }
}
