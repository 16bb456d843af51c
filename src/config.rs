//! Digest settings and the feed source catalog.
//!
//! The built-in catalog lists the French outlets the digest was designed
//! around. A YAML file with the same shape can replace it:
//!
//! ```yaml
//! - name: "France Info - France"
//!   url: "https://www.francetvinfo.fr/france.rss"
//!   category: "FRANCE"
//! ```

use crate::models::{Category, Source};
use chrono::Duration;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument, warn};
use url::Url;

/// Limits applied while collecting and rendering articles.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestOptions {
    /// Entries published before `now - max_age` are skipped.
    pub max_age: Duration,
    /// Stop reading a feed once this many entries were kept.
    pub max_items_per_source: usize,
    /// Maximum headlines per digest section.
    pub max_per_category: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            max_age: Duration::hours(24),
            max_items_per_source: 8,
            max_per_category: 5,
        }
    }
}

const DEFAULT_SOURCES: &[(&str, &str, &str)] = &[
    ("France Info - France", "https://www.francetvinfo.fr/france.rss", "FRANCE"),
    ("Le Monde - Politique", "https://www.lemonde.fr/politique/rss_full.xml", "FRANCE"),
    ("Le Figaro - Politique", "https://www.lefigaro.fr/rss/figaro_politique.xml", "FRANCE"),
    ("France Info - Monde", "https://www.francetvinfo.fr/monde.rss", "INTERNATIONAL"),
    ("Le Monde - International", "https://www.lemonde.fr/international/rss_full.xml", "INTERNATIONAL"),
    ("France 24", "https://www.france24.com/fr/rss", "INTERNATIONAL"),
    ("France Info - Eco", "https://www.francetvinfo.fr/economie.rss", "ÉCONOMIE"),
    ("Le Monde - Eco", "https://www.lemonde.fr/economie/rss_full.xml", "ÉCONOMIE"),
    ("Le Figaro - Eco", "https://www.lefigaro.fr/rss/figaro_economie.xml", "ÉCONOMIE"),
    ("France Info - Société", "https://www.francetvinfo.fr/societe.rss", "SOCIÉTÉ"),
    ("Le Monde - Société", "https://www.lemonde.fr/societe/rss_full.xml", "SOCIÉTÉ"),
    ("France Info - Sport", "https://www.francetvinfo.fr/sports.rss", "SPORT"),
    ("Le Monde - Sport", "https://www.lemonde.fr/sport/rss_full.xml", "SPORT"),
    ("France Info - Culture", "https://www.francetvinfo.fr/culture.rss", "CULTURE"),
    ("Le Monde - Tech", "https://www.lemonde.fr/pixels/rss_full.xml", "TECH"),
];

/// The built-in catalog, in fetch order.
pub fn default_catalog() -> Vec<Source> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url, category)| Source::new(name, url, category))
        .collect()
}

/// Parse a YAML catalog and check that every URL is absolute and parseable.
pub fn parse_catalog(yaml: &str) -> Result<Vec<Source>, Box<dyn Error>> {
    let sources: Vec<Source> = serde_yaml::from_str(yaml)?;
    for source in &sources {
        Url::parse(&source.url)
            .map_err(|e| format!("source {:?} has an invalid url {:?}: {e}", source.name, source.url))?;
    }
    Ok(sources)
}

/// Sources whose category has no section in the digest.
///
/// Such sources are still fetched, but their articles are never shown.
fn hidden_sources(sources: &[Source]) -> impl Iterator<Item = &Source> {
    sources
        .iter()
        .filter(|s| Category::from_label(&s.category).is_none())
}

/// Load the catalog from `path`, or fall back to [`default_catalog`].
///
/// A catalog source whose category is not one of [`Category::ALL`] is kept
/// and logged at warn level.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid YAML list of
/// sources, or names a source with an invalid URL.
#[instrument(level = "info")]
pub async fn load_catalog(path: Option<&Path>) -> Result<Vec<Source>, Box<dyn Error>> {
    let Some(path) = path else {
        let sources = default_catalog();
        info!(count = sources.len(), "Using built-in source catalog");
        return Ok(sources);
    };
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read source catalog {}: {e}", path.display()))?;
    let sources = parse_catalog(&yaml)?;
    for source in hidden_sources(&sources) {
        warn!(
            source = %source.name,
            category = %source.category,
            "Category has no digest section; articles from this source will not be shown"
        );
    }
    info!(count = sources.len(), path = %path.display(), "Loaded source catalog");
    Ok(sources)
}
