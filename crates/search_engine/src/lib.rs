//! Search engine: HTTP adapters, normalization and effect execution.
mod aggregate;
mod decode;
mod engine;
mod fetch;
mod joke;
mod normalize;
mod source;
mod types;

pub use aggregate::{search_or_empty, Aggregator};
pub use decode::{decode_json, DecodeError};
pub use engine::{EngineConfig, EngineHandle, DEFAULT_BACKEND_URL};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use joke::{JokeSource, DEFAULT_JOKE_URL};
pub use normalize::{normalize, plain_text};
pub use source::{endpoint_path, search_url, HttpSource, SearchSource};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
