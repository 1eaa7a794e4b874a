use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use search_core::{Generation, SourceType};
use search_logging::{search_debug, search_info, search_warn};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::aggregate::Aggregator;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::joke::{JokeSource, DEFAULT_JOKE_URL};
use crate::EngineEvent;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub backend_url: Url,
    pub joke_url: Url,
    pub sources: Vec<SourceType>,
}

impl EngineConfig {
    pub fn with_backend(backend_url: Url) -> Self {
        Self {
            fetch: FetchSettings::default(),
            backend_url,
            joke_url: Url::parse(DEFAULT_JOKE_URL).expect("default joke url is valid"),
            sources: SourceType::BY_PRIORITY.to_vec(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_backend(Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"))
    }
}

enum EngineCommand {
    Search { generation: Generation, query: String },
    Cancel { generation: Generation },
    FetchJoke,
}

/// Runs aggregation cycles and joke fetches on a background tokio runtime.
///
/// At most one cycle is in flight: starting a newer one cancels the older.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone()).map_err(io::Error::other)?;
        let fetcher: Arc<dyn Fetcher> = Arc::new(fetcher);
        let aggregator = Aggregator::over_http(&config.backend_url, &config.sources, fetcher.clone());
        let jokes = Arc::new(JokeSource::new(config.joke_url.clone(), fetcher));
        Self::with_parts(aggregator, jokes)
    }

    pub fn with_parts(aggregator: Aggregator, jokes: Arc<JokeSource>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        search_info!("engine started with sources {:?}", aggregator.source_types());

        thread::spawn(move || {
            let mut in_flight: Option<(Generation, CancellationToken)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Search { generation, query } => {
                        if let Some((previous, token)) = in_flight.take() {
                            search_debug!("cycle {} superseded by {}", previous, generation);
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        in_flight = Some((generation, token.clone()));
                        let aggregator = aggregator.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            tokio::select! {
                                _ = token.cancelled() => {
                                    search_debug!("cycle {} dropped", generation);
                                }
                                items = aggregator.aggregate(&query) => {
                                    let _ = event_tx.send(EngineEvent::ResultsReady {
                                        generation,
                                        query: query.clone(),
                                        items,
                                    });
                                }
                            }
                        });
                    }
                    EngineCommand::Cancel { generation } => {
                        if let Some((current, token)) = in_flight.take() {
                            if current < generation {
                                token.cancel();
                            } else {
                                in_flight = Some((current, token));
                            }
                        }
                    }
                    EngineCommand::FetchJoke => {
                        let jokes = jokes.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = jokes.fetch().await.map_err(|err| {
                                search_warn!("joke fetch failed: {}", err);
                                err.kind
                            });
                            let _ = event_tx.send(EngineEvent::JokeLoaded { result });
                        });
                    }
                }
            }
            search_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn search(&self, generation: Generation, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            generation,
            query: query.into(),
        });
    }

    /// Cancels any in-flight cycle older than `generation`.
    pub fn cancel(&self, generation: Generation) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { generation });
    }

    pub fn fetch_joke(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchJoke);
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }
}
