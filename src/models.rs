//! Data models shared by the digest builder and the match-text parser.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`Source`]: A named, categorized feed endpoint from the catalog
//! - [`Category`]: The closed, ordered table of digest sections
//! - [`Article`]: A recent feed entry kept for rendering
//! - [`IndexEntry`] / [`ArticleIndex`]: The numbered lookup table written next to the digest
//! - [`MatchRecord`]: One parsed tennis result
//!
//! Field order on the serialized types is significant: it is the key order of
//! the JSON files consumed downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A feed source from the catalog.
///
/// The category is kept as a free-form label so that a user-supplied catalog
/// can name sections the renderer does not know about; those articles are
/// collected but never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// Display name, also used as the article's `source` field.
    pub name: String,
    /// RSS or Atom endpoint.
    pub url: String,
    /// Category label, e.g. `"FRANCE"` or `"ÉCONOMIE"`.
    pub category: String,
}

impl Source {
    pub fn new(name: &str, url: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        }
    }
}

/// Digest sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    France,
    International,
    Economie,
    Societe,
    Sport,
    Culture,
    Tech,
}

impl Category {
    /// Every category in the order the digest renders them.
    pub const ALL: [Category; 7] = [
        Category::France,
        Category::International,
        Category::Economie,
        Category::Societe,
        Category::Sport,
        Category::Culture,
        Category::Tech,
    ];

    /// The label used in catalogs, section headings and the index file.
    pub fn label(self) -> &'static str {
        match self {
            Category::France => "FRANCE",
            Category::International => "INTERNATIONAL",
            Category::Economie => "ÉCONOMIE",
            Category::Societe => "SOCIÉTÉ",
            Category::Sport => "SPORT",
            Category::Culture => "CULTURE",
            Category::Tech => "TECH",
        }
    }

    /// Decorative marker printed before each headline of the section.
    pub fn marker(self) -> &'static str {
        match self {
            Category::France => "🇫🇷",
            Category::International => "🌍",
            Category::Economie => "💰",
            Category::Societe => "👥",
            Category::Sport => "⚽",
            Category::Culture => "🎭",
            Category::Tech => "💻",
        }
    }

    /// Look a category up by its exact label.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A feed entry that passed the recency filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    /// Tag-stripped, truncated summary. May be empty.
    pub description: String,
    /// Name of the [`Source`] it came from.
    pub source: String,
    /// Category label inherited from the source.
    pub category: String,
    pub link: String,
    pub published: DateTime<Utc>,
}

impl Article {
    /// Key used to drop near-duplicate headlines: the first 50 characters of
    /// the title, lowercased.
    pub fn dedup_key(&self) -> String {
        self.title.chars().take(50).collect::<String>().to_lowercase()
    }
}

/// Compact article summary stored in the article index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexEntry {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub category: String,
}

impl From<&Article> for IndexEntry {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            url: article.link.clone(),
            source: article.source.clone(),
            category: article.category.clone(),
        }
    }
}

/// Display number (1-based, global across categories) to article summary.
///
/// Serializes as a JSON object with decimal string keys in numeric order.
pub type ArticleIndex = BTreeMap<usize, IndexEntry>;

/// The output of one digest rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    /// The formatted press review.
    pub markdown: String,
    /// Lookup table matching the numbers printed in `markdown`.
    pub index: ArticleIndex,
}

/// One tennis result extracted from copied data-hub text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchRecord {
    /// Caller-supplied date label, `YYYY-MM-DD` by convention.
    pub date: Option<String>,
    /// Local time of the result, e.g. `"10h23"`.
    pub time: String,
    pub tournament: String,
    pub player1: String,
    pub player2: String,
    /// Raw score string, e.g. `"7/6 6/2"`.
    pub score: String,
    /// Whitespace-separated tokens of `score`.
    pub sets: Vec<String>,
    pub winner: String,
    pub odds_player1: Option<f64>,
    pub odds_player2: Option<f64>,
    pub winner_odds: Option<f64>,
    pub loser_odds: Option<f64>,
}
