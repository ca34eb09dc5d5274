//! headlines.rs — turns raw provider records into the credible headline feed.
//!
//! Steps, in order: required-field check, mapping to [`NewsArticle`], a reduced
//! keyword heuristic over title + description, and a cap of [`MAX_ARTICLES`].
//! Records that do not fit the expected shape are dropped, never reported.

use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on articles returned per fetch.
pub const MAX_ARTICLES: usize = 10;

/// Phrases that disqualify a headline from the credible feed.
pub const HEADLINE_SUSPICIOUS_PHRASES: [&str; 13] = [
    "shocking",
    "exclusive",
    "secret",
    "exposed",
    "miracle",
    "doctors hate",
    "won't believe",
    "big pharma",
    "mainstream media",
    "hidden truth",
    "government hiding",
    "they don't want you to know",
    "weird trick",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Provider record as received; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub url_to_image: Option<String>,
}

/// One article of the credible feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    /// `<url>-<index>`, unique within one fetch.
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Provider timestamp, passed through unchanged.
    pub published_at: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("No articles found")]
    NoArticles,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Required fields extracted from a record, or `None` if any is missing.
struct Complete<'a> {
    title: &'a str,
    url: &'a str,
    source: &'a str,
    published_at: &'a str,
    image: &'a str,
    description: &'a str,
}

impl RawArticle {
    fn complete(&self) -> Option<Complete<'_>> {
        let source = self.source.as_ref().and_then(|s| present(&s.name))?;
        Some(Complete {
            title: present(&self.title)?,
            url: present(&self.url)?,
            source,
            published_at: present(&self.published_at)?,
            image: present(&self.url_to_image)?,
            description: self.description.as_deref().unwrap_or_default(),
        })
    }
}

impl Complete<'_> {
    fn into_article(self, index: usize) -> NewsArticle {
        NewsArticle {
            id: format!("{}-{}", self.url, index),
            title: self.title.to_string(),
            description: self.description.to_string(),
            url: self.url.to_string(),
            published_at: self.published_at.to_string(),
            source: self.source.to_string(),
            url_to_image: Some(self.image.to_string()),
        }
    }
}

/// Number of headline phrases found in the article's title + description.
pub fn suspicious_count(article: &NewsArticle) -> usize {
    let combined = format!(
        "{} {}",
        article.title.to_lowercase(),
        article.description.to_lowercase()
    );
    HEADLINE_SUSPICIOUS_PHRASES
        .iter()
        .filter(|p| combined.contains(*p))
        .count()
}

pub fn is_credible(article: &NewsArticle) -> bool {
    suspicious_count(article) == 0
}

/// Keep complete, credible records in provider order, at most [`MAX_ARTICLES`].
pub fn filter_credible(records: &[RawArticle]) -> Vec<NewsArticle> {
    let total = records.len();
    let kept: Vec<NewsArticle> = records
        .iter()
        .filter_map(RawArticle::complete)
        .enumerate()
        .map(|(idx, c)| c.into_article(idx))
        .filter(is_credible)
        .take(MAX_ARTICLES)
        .collect();

    counter!("headline_filter_kept_total").increment(kept.len() as u64);
    counter!("headline_filter_dropped_total").increment((total - kept.len()) as u64);
    tracing::debug!(total, kept = kept.len(), "headline filter pass");
    kept
}

/// Pull the `articles` array out of a provider body.
///
/// Entries that do not decode as [`RawArticle`] (wrong JSON types) are skipped.
pub fn parse_feed(body: &Value) -> Result<Vec<RawArticle>, FeedError> {
    let items = body
        .get("articles")
        .and_then(Value::as_array)
        .ok_or(FeedError::NoArticles)?;
    Ok(items
        .iter()
        .filter_map(|v| serde_json::from_value::<RawArticle>(v.clone()).ok())
        .collect())
}
