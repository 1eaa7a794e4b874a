use std::fmt;
use std::str::FromStr;

/// Which backend a result came from. Closed set: every renderer matches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceType {
    WikipediaArticle,
    RedditMeme,
    CfaBreedProfile,
}

impl SourceType {
    /// All sources in publication order.
    pub const BY_PRIORITY: [SourceType; 3] = [
        SourceType::CfaBreedProfile,
        SourceType::RedditMeme,
        SourceType::WikipediaArticle,
    ];

    /// Lower values are listed first in the merged result list.
    pub fn priority(self) -> u8 {
        match self {
            SourceType::CfaBreedProfile => 0,
            SourceType::RedditMeme => 1,
            SourceType::WikipediaArticle => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceType::WikipediaArticle => "WikipediaArticle",
            SourceType::RedditMeme => "RedditMeme",
            SourceType::CfaBreedProfile => "CfaBreedProfile",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceTypeError {
    pub input: String,
}

impl fmt::Display for ParseSourceTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown source '{}' (expected catalog, social or article)",
            self.input
        )
    }
}

impl std::error::Error for ParseSourceTypeError {}

impl FromStr for SourceType {
    type Err = ParseSourceTypeError;

    /// Accepts the short config names as well as the labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" | "cfa" | "cfabreedprofile" => Ok(SourceType::CfaBreedProfile),
            "social" | "reddit" | "redditmeme" => Ok(SourceType::RedditMeme),
            "article" | "wikipedia" | "wikipediaarticle" => Ok(SourceType::WikipediaArticle),
            _ => Err(ParseSourceTypeError {
                input: s.to_string(),
            }),
        }
    }
}

/// One search hit, whatever backend produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source_type: SourceType,
    pub score: Option<f64>,
}

/// Concatenates per-source batches in source priority order.
///
/// Batches may arrive in any order; items keep their backend order within a
/// source. The result only depends on which source produced each batch.
pub fn merge_by_priority(
    mut batches: Vec<(SourceType, Vec<NormalizedResult>)>,
) -> Vec<NormalizedResult> {
    batches.sort_by_key(|(source_type, _)| source_type.priority());
    let total = batches.iter().map(|(_, items)| items.len()).sum();
    let mut merged = Vec::with_capacity(total);
    for (_, items) in batches {
        merged.extend(items);
    }
    merged
}
