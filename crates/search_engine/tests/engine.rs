use std::sync::mpsc::RecvTimeoutError;
use std::sync::Once;
use std::time::{Duration, Instant};

use search_core::SourceType;
use search_engine::{EngineConfig, EngineEvent, EngineHandle, FailureKind};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(search_logging::initialize_for_tests);
}

fn config_for(server: &MockServer) -> EngineConfig {
    let mut config = EngineConfig::with_backend(Url::parse(&server.uri()).unwrap());
    config.joke_url = Url::parse(&format!("{}/random_joke", server.uri())).unwrap();
    config.sources = vec![SourceType::CfaBreedProfile];
    config
}

fn collect_events(engine: &EngineHandle, window: Duration) -> Vec<EngineEvent> {
    let deadline = Instant::now() + window;
    let mut events = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match engine.recv_timeout(remaining) {
            Ok(event) => events.push(event),
            Err(_) => break,
        }
    }
    events
}

fn mock_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

#[test]
fn search_publishes_results_with_generation() {
    init_logging();
    let rt = mock_runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search_cfa"))
            .and(query_param("q", "maine coon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Maine Coon", "description": "Large friendly breed", "url": "/cfa/maine-coon"}
            ])))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(config_for(&server)).unwrap();
    engine.search(1, "maine coon");

    match engine.recv_timeout(Duration::from_secs(5)) {
        Ok(EngineEvent::ResultsReady {
            generation,
            query,
            items,
        }) => {
            assert_eq!(generation, 1);
            assert_eq!(query, "maine coon");
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].title, "Maine Coon");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn newer_search_cancels_older_cycle() {
    init_logging();
    let rt = mock_runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search_cfa"))
            .and(query_param("q", "query a"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"name": "A", "url": "/a"}]))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search_cfa"))
            .and(query_param("q", "query b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "B", "url": "/b"}])))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(config_for(&server)).unwrap();
    engine.search(1, "query a");
    engine.search(2, "query b");

    let generations: Vec<_> = collect_events(&engine, Duration::from_millis(1200))
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::ResultsReady { generation, .. } => Some(generation),
            _ => None,
        })
        .collect();
    assert_eq!(generations, vec![2]);
}

#[test]
fn cancel_drops_in_flight_cycle() {
    init_logging();
    let rt = mock_runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(config_for(&server)).unwrap();
    engine.search(1, "siamese");
    engine.cancel(2);

    assert!(collect_events(&engine, Duration::from_millis(800)).is_empty());
}

#[test]
fn joke_is_fetched_and_trimmed() {
    init_logging();
    let rt = mock_runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/random_joke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "general",
                "setup": " What do you call a pile of cats? ",
                "punchline": "A meowtain.",
                "id": 7
            })))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(config_for(&server)).unwrap();
    engine.fetch_joke();

    match engine.recv_timeout(Duration::from_secs(5)) {
        Ok(EngineEvent::JokeLoaded { result: Ok(joke) }) => {
            assert_eq!(joke.setup, "What do you call a pile of cats?");
            assert_eq!(joke.punchline, "A meowtain.");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn joke_failure_reports_kind() {
    init_logging();
    let rt = mock_runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/random_joke"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(config_for(&server)).unwrap();
    engine.fetch_joke();

    assert_eq!(
        engine.recv_timeout(Duration::from_secs(5)),
        Ok(EngineEvent::JokeLoaded {
            result: Err(FailureKind::HttpStatus(404))
        })
    );
}

#[test]
fn idle_engine_times_out_instead_of_disconnecting() {
    init_logging();
    let engine = EngineHandle::new(EngineConfig::default()).unwrap();

    assert_eq!(
        engine.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Timeout)
    );
}
