//! Feed ingestion for the digest builder.
//!
//! Each source is fetched once, parsed as RSS or Atom with `feed-rs`, and
//! reduced to the recent [`Article`]s it contains. Sources are processed one
//! after the other; a source that fails to download or parse is logged and
//! contributes nothing.

use crate::config::DigestOptions;
use crate::models::{Article, Source};
use crate::utils::clean_description;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info, instrument};

/// Title used when an entry has none.
pub const UNTITLED: &str = "Sans titre";

/// The parts of a feed entry the digest cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    /// Summary/description, or the content body when there is no summary.
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl From<feed_rs::model::Entry> for FeedEntry {
    fn from(entry: feed_rs::model::Entry) -> Self {
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));
        Self {
            title: entry.title.map(|t| t.content),
            summary,
            link: entry.links.into_iter().next().map(|l| l.href),
            published: entry.published,
            updated: entry.updated,
        }
    }
}

/// Parse a raw RSS/Atom document into entries, in document order.
pub fn parse_entries(bytes: &[u8]) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let feed = feed_rs::parser::parse(bytes)?;
    Ok(feed.entries.into_iter().map(FeedEntry::from).collect())
}

/// Keep the recent entries of one source.
///
/// Walks `entries` in order and stops once `opts.max_items_per_source`
/// articles were kept. An entry is skipped when it has neither a published
/// nor an updated timestamp, or when that timestamp is older than
/// `now - opts.max_age`.
pub fn extract_articles<I>(
    source: &Source,
    entries: I,
    opts: &DigestOptions,
    now: DateTime<Utc>,
) -> Vec<Article>
where
    I: IntoIterator<Item = FeedEntry>,
{
    let cutoff = now - opts.max_age;
    let mut articles = Vec::new();

    for entry in entries {
        if articles.len() >= opts.max_items_per_source {
            break;
        }
        let Some(published) = entry.published.or(entry.updated) else {
            debug!(source = %source.name, title = ?entry.title, "Skipping undated entry");
            continue;
        };
        if published < cutoff {
            continue;
        }

        articles.push(Article {
            title: entry.title.unwrap_or_else(|| UNTITLED.to_string()),
            description: clean_description(entry.summary.as_deref().unwrap_or_default()),
            source: source.name.clone(),
            category: source.category.clone(),
            link: entry.link.unwrap_or_default(),
            published,
        });
    }
    articles
}

/// Download and filter a single source.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `source` - Feed to download; its name and category are copied onto every article
/// * `opts` - Recency window and per-source cap
/// * `now` - Reference instant for the recency cutoff
///
/// # Returns
///
/// The kept articles, in feed order.
///
/// # Errors
///
/// Returns an error if the request fails, the server answers with a non-2xx
/// status, or the body is not a readable RSS/Atom document.
#[instrument(level = "info", skip_all, fields(source = %source.name, url = %source.url))]
pub async fn fetch_feed(
    client: &Client,
    source: &Source,
    opts: &DigestOptions,
    now: DateTime<Utc>,
) -> Result<Vec<Article>, Box<dyn Error>> {
    let body = client
        .get(&source.url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    debug!(bytes = body.len(), "Downloaded feed");
    let entries = parse_entries(&body)?;
    Ok(extract_articles(source, entries, opts, now))
}

/// Fetch every source in catalog order and concatenate their articles.
///
/// Failures are logged with the source name and swallowed.
///
/// # Returns
///
/// All kept articles, grouped by source in catalog order. An empty vector
/// when every source failed or nothing was recent enough. A source counts as
/// failed whenever [`fetch_feed`] returns an error for it.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn fetch_all(
    client: &Client,
    sources: &[Source],
    opts: &DigestOptions,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let per_source: Vec<Vec<Article>> = stream::iter(sources)
        .then(move |source| async move {
            info!(source = %source.name, "Fetching feed");
            match fetch_feed(client, source, opts, now).await {
                Ok(articles) => {
                    info!(source = %source.name, count = articles.len(), "Collected articles");
                    articles
                }
                Err(e) => {
                    error!(source = %source.name, error = %e, "Feed fetch failed");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    let articles: Vec<Article> = per_source.into_iter().flatten().collect();
    info!(count = articles.len(), "Total articles collected");
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
    <title>Test</title>
    <link>https://example.org</link>
    <description>Test feed</description>
    <item>
        <title>Réforme des retraites</title>
        <link>https://example.org/retraites</link>
        <description>&lt;p&gt;Le texte&lt;br/&gt;arrive au Sénat.&lt;/p&gt;</description>
        <pubDate>Sat, 10 Jan 2026 08:00:00 +0000</pubDate>
    </item>
    <item>
        <title>Old news</title>
        <link>https://example.org/old</link>
        <description>Stale</description>
        <pubDate>Thu, 08 Jan 2026 08:00:00 +0000</pubDate>
    </item>
</channel></rss>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    fn source(url: &str) -> Source {
        Source::new("France Info - France", url, "FRANCE")
    }

    fn entry(title: &str, published: Option<DateTime<Utc>>) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_string()),
            summary: Some(format!("about {title}")),
            link: Some(format!("https://example.org/{title}")),
            published,
            updated: None,
        }
    }

    #[test]
    fn test_extract_skips_undated_and_old_entries() {
        let entries = vec![
            entry("fresh", Some(now() - Duration::hours(1))),
            entry("undated", None),
            entry("old", Some(now() - Duration::hours(25))),
            entry("edge", Some(now() - Duration::hours(24))),
        ];
        let articles = extract_articles(&source("x"), entries, &DigestOptions::default(), now());
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["fresh", "edge"]);
    }

    #[test]
    fn test_extract_falls_back_to_updated() {
        let mut e = entry("updated only", None);
        e.updated = Some(now() - Duration::hours(2));
        let articles = extract_articles(&source("x"), vec![e], &DigestOptions::default(), now());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].published, now() - Duration::hours(2));
    }

    #[test]
    fn test_extract_prefers_published_over_updated() {
        let mut e = entry("both", Some(now() - Duration::hours(30)));
        e.updated = Some(now() - Duration::hours(1));
        let articles = extract_articles(&source("x"), vec![e], &DigestOptions::default(), now());
        assert!(articles.is_empty());
    }

    #[test]
    fn test_extract_respects_item_cap_in_feed_order() {
        let entries: Vec<FeedEntry> = (0..12)
            .map(|i| entry(&format!("t{i}"), Some(now() - Duration::minutes(i))))
            .collect();
        let articles = extract_articles(&source("x"), entries, &DigestOptions::default(), now());
        assert_eq!(articles.len(), 8);
        assert_eq!(articles[0].title, "t0");
        assert_eq!(articles[7].title, "t7");
    }

    #[test]
    fn test_extract_defaults_missing_fields() {
        let e = FeedEntry {
            published: Some(now()),
            ..FeedEntry::default()
        };
        let articles = extract_articles(&source("x"), vec![e], &DigestOptions::default(), now());
        assert_eq!(articles[0].title, UNTITLED);
        assert_eq!(articles[0].description, "");
        assert_eq!(articles[0].link, "");
        assert_eq!(articles[0].category, "FRANCE");
        assert_eq!(articles[0].source, "France Info - France");
    }

    #[test]
    fn test_extract_cleans_description() {
        let mut e = entry("long", Some(now()));
        e.summary = Some(format!("<p>{}</p>", "lorem ipsum ".repeat(30)));
        let articles = extract_articles(&source("x"), vec![e], &DigestOptions::default(), now());
        let desc = &articles[0].description;
        assert!(desc.ends_with("..."));
        assert!(!desc.contains("<p>"));
        assert!(desc.chars().count() <= 203);
    }

    #[test]
    fn test_parse_entries_rss() {
        let entries = parse_entries(RSS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Réforme des retraites"));
        assert_eq!(entries[0].link.as_deref(), Some("https://example.org/retraites"));
        assert_eq!(
            entries[0].published,
            Some(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_entries_atom_content_fallback() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>T</title>
    <id>urn:t</id>
    <updated>2026-01-10T08:00:00Z</updated>
    <entry>
        <title>A</title>
        <id>urn:a</id>
        <updated>2026-01-10T08:00:00Z</updated>
        <content type="html">&lt;p&gt;Body&lt;/p&gt;</content>
    </entry>
</feed>"#;
        let entries = parse_entries(atom.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("A"));
        assert_eq!(entries[0].summary.as_deref(), Some("<p>Body</p>"));
        assert_eq!(entries[0].published, None);
        assert_eq!(
            entries[0].updated,
            Some(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap())
        );

        let articles = extract_articles(&source("x"), entries, &DigestOptions::default(), now());
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].description, "Body");
        assert_eq!(
            articles[0].published,
            Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_entries_rejects_garbage() {
        assert!(parse_entries(b"<not valid xml").is_err());
    }

    #[tokio::test]
    async fn test_fetch_feed_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/france.rss"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(RSS)
                    .insert_header("Content-Type", "application/rss+xml"),
            )
            .mount(&server)
            .await;

        let src = source(&format!("{}/france.rss", server.uri()));
        let articles = fetch_feed(&Client::new(), &src, &DigestOptions::default(), now())
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Réforme des retraites");
        let desc = &articles[0].description;
        assert!(!desc.contains("<p>"));
        assert!(desc.starts_with("Le texte"));
        assert!(desc.contains("arrive au Sénat."));
    }

    #[tokio::test]
    async fn test_fetch_feed_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let src = source(&format!("{}/missing.rss", server.uri()));
        let result = fetch_feed(&Client::new(), &src, &DigestOptions::default(), now()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_skips_failing_sources() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/good.rss"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RSS))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.rss"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<not valid xml"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down.rss"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let sources = vec![
            Source::new("broken", &format!("{}/broken.rss", server.uri()), "FRANCE"),
            Source::new("good", &format!("{}/good.rss", server.uri()), "SPORT"),
            Source::new("down", &format!("{}/down.rss", server.uri()), "TECH"),
        ];
        let articles = fetch_all(&Client::new(), &sources, &DigestOptions::default(), now()).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "good");
        assert_eq!(articles[0].category, "SPORT");
    }
}
