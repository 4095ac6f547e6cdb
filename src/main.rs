//! Post SEO report - scores every translation of a post and runs the save checks
//!
//! Usage:
//!   cargo run -- post.json              # Report and check as a draft
//!   cargo run -- post.json --publish    # Also require every supported locale
//!
//! The file holds `{ "translations": { "<locale>": { "title": ..., "seo": {...} } } }`.
//!
//! Optional environment variables:
//! - SUPPORTED_LOCALES (defaults to en,vi)
//! - DEFAULT_LOCALE (defaults to the first supported locale)
//! - SEO_MIN_TITLE_CHARS / SEO_MAX_TITLE_CHARS (defaults to 30 / 60)
//! - SEO_MIN_DESCRIPTION_CHARS / SEO_MAX_DESCRIPTION_CHARS (defaults to 70 / 160)
//! - SEO_MIN_CONTENT_WORDS (defaults to 300)

use anyhow::{bail, Result};
use post_seo_editor::config::Config;
use post_seo_editor::editor::{prepare_save, EditorSection, SaveMode};
use post_seo_editor::schema::TracingNotifier;
use post_seo_editor::store::TranslationStore;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("post_seo_editor=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let publish = args.iter().any(|arg| arg == "--publish");
    let Some(path) = args.iter().find(|arg| !arg.starts_with("--")) else {
        bail!("Usage: post-seo-editor <post.json> [--publish]");
    };

    let config = Config::from_env()?;
    let registry = config.locale_registry()?;

    let store = TranslationStore::load(path, &registry)?;

    info!("Loaded {} translation(s) from {}", store.len(), path);

    for locale in store.locales() {
        let Some(analysis) = store.analyze(locale, &config.seo) else {
            continue;
        };

        println!("== {}: score {}/100 ({:?})", locale, analysis.score, analysis.grade());
        for check in &analysis.checks {
            let mark = if check.ok { "✓" } else { "✗" };
            println!("  {} {}", mark, check.label);
            if let Some(hint) = &check.hint {
                println!(
                    "      {} [{}]",
                    hint,
                    EditorSection::for_rule(check.rule)
                );
            }
        }
    }

    let mode = if publish {
        SaveMode::Publish
    } else {
        SaveMode::Draft
    };
    let document = prepare_save(&store, &registry, mode, &mut TracingNotifier)?;

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
