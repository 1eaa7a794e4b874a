use std::sync::Arc;

use search_core::Joke;
use serde::Deserialize;
use url::Url;

use crate::decode::decode_json;
use crate::fetch::Fetcher;
use crate::{FailureKind, FetchError};

pub const DEFAULT_JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";

#[derive(Debug, Deserialize)]
struct RawJoke {
    setup: String,
    punchline: String,
}

pub struct JokeSource {
    url: Url,
    fetcher: Arc<dyn Fetcher>,
}

impl JokeSource {
    pub fn new(url: Url, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { url, fetcher }
    }

    pub async fn fetch(&self) -> Result<Joke, FetchError> {
        let output = self.fetcher.fetch(&self.url).await?;
        let body = decode_json(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        let raw: RawJoke = serde_json::from_value(body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(Joke {
            setup: raw.setup.trim().to_string(),
            punchline: raw.punchline.trim().to_string(),
        })
    }
}
