use std::sync::Arc;

use futures_util::future::join_all;
use search_core::{merge_by_priority, NormalizedResult, SourceType};
use search_logging::{search_debug, search_warn};
use url::Url;

use crate::fetch::Fetcher;
use crate::source::{HttpSource, SearchSource};

/// Joins every configured source into one list ordered by source priority.
#[derive(Clone)]
pub struct Aggregator {
    sources: Vec<Arc<dyn SearchSource>>,
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn SearchSource>>) -> Self {
        Self { sources }
    }

    /// One [`HttpSource`] per entry of `source_types`, all on `base`.
    pub fn over_http(base: &Url, source_types: &[SourceType], fetcher: Arc<dyn Fetcher>) -> Self {
        let sources = source_types
            .iter()
            .map(|&source_type| {
                Arc::new(HttpSource::new(source_type, base.clone(), fetcher.clone()))
                    as Arc<dyn SearchSource>
            })
            .collect();
        Self::new(sources)
    }

    pub fn source_types(&self) -> Vec<SourceType> {
        self.sources.iter().map(|s| s.source_type()).collect()
    }

    /// Runs all sources concurrently and waits for every one of them.
    ///
    /// An empty (or blank) query returns immediately without any request.
    /// A failing source contributes nothing; this never fails as a whole.
    pub async fn aggregate(&self, query: &str) -> Vec<NormalizedResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let batches = join_all(
            self.sources
                .iter()
                .map(|source| search_or_empty(source.as_ref(), query)),
        )
        .await;

        let merged = merge_by_priority(batches);
        search_debug!("query {:?} aggregated {} results", query, merged.len());
        merged
    }
}

/// Folds a source failure into an empty contribution.
pub async fn search_or_empty(
    source: &dyn SearchSource,
    query: &str,
) -> (SourceType, Vec<NormalizedResult>) {
    let source_type = source.source_type();
    match source.search(query).await {
        Ok(items) => {
            search_debug!("{} returned {} results", source_type, items.len());
            (source_type, items)
        }
        Err(err) => {
            search_warn!("{} failed for {:?}: {}", source_type, query, err);
            (source_type, Vec::new())
        }
    }
}
