use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use search_core::{Effect, Msg};
use search_engine::{EngineConfig, EngineEvent, EngineHandle};
use search_logging::{search_debug, search_info, search_warn};

use super::app::LoopEvent;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, loop_tx: mpsc::Sender<LoopEvent>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(config)?;
        let runner = Self { engine };
        runner.spawn_event_loop(loop_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchResults { generation, query } => {
                    search_info!(
                        "FetchResults generation={} query_len={} query={:?}",
                        generation,
                        query.len(),
                        query
                    );
                    self.engine.search(generation, query);
                }
                Effect::CancelResults { generation } => {
                    search_debug!("CancelResults before generation={}", generation);
                    self.engine.cancel(generation);
                }
                Effect::Navigate { location } => {
                    search_info!("Navigate location={}", location);
                }
                Effect::FetchJoke => self.engine.fetch_joke(),
            }
        }
    }

    fn spawn_event_loop(&self, loop_tx: mpsc::Sender<LoopEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(Duration::from_millis(250)) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    search_warn!("search engine stopped; no further results");
                    break;
                }
            };
            let msg = match event {
                EngineEvent::ResultsReady {
                    generation,
                    query,
                    items,
                } => {
                    search_info!(
                        "ResultsReady generation={} query={:?} items={}",
                        generation,
                        query,
                        items.len()
                    );
                    Msg::ResultsReady { generation, items }
                }
                EngineEvent::JokeLoaded { result } => match result {
                    Ok(joke) => Msg::JokeLoaded(Some(joke)),
                    Err(failure_kind) => {
                        search_warn!("Joke unavailable: {}", failure_kind);
                        Msg::JokeLoaded(None)
                    }
                },
            };
            if loop_tx.send(LoopEvent::Msg(msg)).is_err() {
                break;
            }
        });
    }
}
