//! Digest rendering: grouping, capping, deduplication and numbering.
//!
//! [`build_digest`] turns the collected articles into the Markdown press
//! review and the numbered [`ArticleIndex`] that goes with it. Sections follow
//! [`Category::ALL`]; articles whose category label is not in that table are
//! never shown.

use crate::models::{Article, ArticleIndex, Category, Digest, IndexEntry};
use crate::utils::take_chars;
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Number of title characters used in the closing list.
const TOC_TITLE_CHARS: usize = 50;

/// Render the digest for `articles`, generated at `generated_at` local time.
///
/// Within each section articles keep their collection order. A section stops
/// after `max_per_category` headlines; a headline whose
/// [`Article::dedup_key`] was already shown earlier in this call is skipped
/// and does not count toward the cap. Display numbers are 1-based and run
/// across sections.
#[instrument(level = "info", skip_all, fields(articles = articles.len()))]
pub fn build_digest(
    articles: &[Article],
    generated_at: NaiveDateTime,
    max_per_category: usize,
) -> Digest {
    let by_category = articles.iter().into_group_map_by(|a| a.category.clone());

    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut index = ArticleIndex::new();
    let mut toc: Vec<String> = Vec::new();

    let mut md = format!(
        "# REVUE DE PRESSE — {}\n\n",
        generated_at.format("%d %B %Y")
    );
    md.push_str(&format!(
        "*Générée automatiquement à {}*\n\n",
        generated_at.format("%H:%M")
    ));

    for category in Category::ALL {
        let Some(group) = by_category.get(category.label()) else {
            continue;
        };

        md.push_str(&format!("## {category}\n\n"));
        let mut shown = 0;

        for article in group {
            if shown >= max_per_category {
                break;
            }
            if !seen_titles.insert(article.dedup_key()) {
                debug!(title = %article.title, "Dropping near-duplicate headline");
                continue;
            }

            md.push_str(&format!("{} **{}**\n", category.marker(), article.title));
            if !article.description.is_empty() {
                md.push_str(&format!("   {}\n", article.description));
            }
            md.push('\n');

            let number = index.len() + 1;
            toc.push(format!(
                "{number}. [{category}] {}...",
                take_chars(&article.title, TOC_TITLE_CHARS)
            ));
            index.insert(number, IndexEntry::from(*article));
            shown += 1;
        }
    }

    md.push_str("---\n\n");
    md.push_str("## POUR APPROFONDIR\n\n");
    md.push_str(&toc.join("\n"));
    md.push_str("\n\n> *Dis-moi un numéro pour creuser un sujet.*\n");

    info!(kept = index.len(), "Rendered digest");
    Digest {
        markdown: md,
        index,
    }
}
