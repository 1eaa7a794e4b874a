//! Per-source JSON shapes and their mapping onto [`NormalizedResult`].
//!
//! Schema drift stays in here: both envelope forms are accepted for every
//! source, each field spelling the scrapers have used gets its own slot and
//! the first non-empty one wins, and an item that does not decode is skipped
//! without affecting its siblings.

use scraper::Html;
use search_core::{NormalizedResult, SourceType};
use search_logging::search_debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, FetchError};

/// Generic article hit: `{title, snippet, url, score}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArticleItem {
    title: Option<String>,
    snippet: Option<String>,
    scraped_content: Option<String>,
    body_text: Option<String>,
    url: Option<String>,
    source_url: Option<String>,
    score: Option<Value>,
}

/// Social post: `{title, snippet, url, source}`. The item's own source label
/// is ignored; the adapter stamps its fixed tag.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SocialItem {
    title: Option<String>,
    snippet: Option<String>,
    scraped_content: Option<String>,
    content: Option<String>,
    url: Option<String>,
    source_url: Option<String>,
    permalink: Option<String>,
    score: Option<Value>,
}

/// Breed profile: `{name, description, url}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogItem {
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    snippet: Option<String>,
    url: Option<String>,
    source_url: Option<String>,
}

/// First spelling that carries non-blank text.
fn first_present<const N: usize>(spellings: [Option<String>; N]) -> Option<String> {
    spellings
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Maps one decoded response body to normalized results for `source_type`.
///
/// Fails only when the body has no recognizable list of items.
pub fn normalize(source_type: SourceType, body: Value) -> Result<Vec<NormalizedResult>, FetchError> {
    let items = unwrap_envelope(body).ok_or_else(|| {
        FetchError::new(
            FailureKind::Decode,
            format!("{source_type}: expected a list or an object with `results`"),
        )
    })?;

    let normalized = match source_type {
        SourceType::WikipediaArticle => map_items(source_type, items, |item: ArticleItem| {
            finish(
                source_type,
                item.title,
                first_present([item.url, item.source_url]),
                first_present([item.snippet, item.scraped_content, item.body_text]),
                item.score,
            )
        }),
        SourceType::RedditMeme => map_items(source_type, items, |item: SocialItem| {
            finish(
                source_type,
                item.title,
                first_present([item.url, item.source_url, item.permalink]),
                first_present([item.snippet, item.scraped_content, item.content]),
                item.score,
            )
        }),
        SourceType::CfaBreedProfile => map_items(source_type, items, |item: CatalogItem| {
            finish(
                source_type,
                first_present([item.name, item.title]),
                first_present([item.url, item.source_url]),
                first_present([item.description, item.snippet]),
                None,
            )
        }),
    };
    Ok(normalized)
}

fn unwrap_envelope(body: Value) -> Option<Vec<Value>> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Some(items),
            Some(Value::Null) => Some(Vec::new()),
            _ => None,
        },
        _ => None,
    }
}

fn map_items<T, F>(source_type: SourceType, items: Vec<Value>, map: F) -> Vec<NormalizedResult>
where
    T: DeserializeOwned,
    F: Fn(T) -> Option<NormalizedResult>,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(item) => map(item),
            Err(err) => {
                search_debug!("{} item {} skipped: {}", source_type, index, err);
                None
            }
        })
        .collect()
}

fn finish(
    source_type: SourceType,
    title: Option<String>,
    url: Option<String>,
    snippet: Option<String>,
    score: Option<Value>,
) -> Option<NormalizedResult> {
    let url = url.map(|u| u.trim().to_string()).unwrap_or_default();
    let title = title.map(|t| plain_text(&t)).unwrap_or_default();
    if title.is_empty() && url.is_empty() {
        return None;
    }
    let title = if title.is_empty() { url.clone() } else { title };
    Some(NormalizedResult {
        title,
        url,
        snippet: snippet.map(|s| plain_text(&s)).unwrap_or_default(),
        source_type,
        score: score.as_ref().and_then(score_value),
    })
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strips markup and collapses whitespace.
pub fn plain_text(raw: &str) -> String {
    let text = if raw.contains('<') || raw.contains('&') {
        Html::parse_fragment(raw)
            .root_element()
            .text()
            .collect::<String>()
    } else {
        raw.to_string()
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
