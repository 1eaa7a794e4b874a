use std::sync::Arc;

use search_core::{NormalizedResult, SourceType};
use url::Url;

use crate::decode::decode_json;
use crate::fetch::Fetcher;
use crate::normalize::normalize;
use crate::{FailureKind, FetchError};

/// Backend path serving each source.
pub fn endpoint_path(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::WikipediaArticle => "search",
        SourceType::RedditMeme => "search_reddit",
        SourceType::CfaBreedProfile => "search_cfa",
    }
}

/// Builds `{base}/{path}?q={query}`, keeping any path prefix on `base`.
pub fn search_url(base: &Url, path: &str, query: &str) -> Result<Url, FetchError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    let mut url = base
        .join(path)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut().clear().append_pair("q", query);
    Ok(url)
}

/// One backend search endpoint.
#[async_trait::async_trait]
pub trait SearchSource: Send + Sync {
    fn source_type(&self) -> SourceType;

    async fn search(&self, query: &str) -> Result<Vec<NormalizedResult>, FetchError>;
}

pub struct HttpSource {
    source_type: SourceType,
    base: Url,
    fetcher: Arc<dyn Fetcher>,
}

impl HttpSource {
    pub fn new(source_type: SourceType, base: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            source_type,
            base,
            fetcher,
        }
    }
}

#[async_trait::async_trait]
impl SearchSource for HttpSource {
    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn search(&self, query: &str) -> Result<Vec<NormalizedResult>, FetchError> {
        let url = search_url(&self.base, endpoint_path(self.source_type), query)?;
        let output = self.fetcher.fetch(&url).await?;
        let body = decode_json(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        normalize(self.source_type, body)
    }
}
