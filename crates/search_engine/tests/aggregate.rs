use std::sync::{Arc, Once};
use std::time::Duration;

use pretty_assertions::assert_eq;
use search_core::{NormalizedResult, SourceType};
use search_engine::{
    search_or_empty, Aggregator, FailureKind, FetchError, FetchSettings, Fetcher, ReqwestFetcher,
    SearchSource,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(search_logging::initialize_for_tests);
}

fn aggregator_for(server: &MockServer) -> Aggregator {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let fetcher: Arc<dyn Fetcher> = Arc::new(fetcher);
    let base = Url::parse(&server.uri()).unwrap();
    Aggregator::over_http(&base, &SourceType::BY_PRIORITY, fetcher)
}

async fn mount_json(
    server: &MockServer,
    route: &str,
    query: &str,
    body: serde_json::Value,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

fn summary(items: &[NormalizedResult]) -> Vec<(SourceType, String)> {
    items
        .iter()
        .map(|i| (i.source_type, i.title.clone()))
        .collect()
}

#[tokio::test]
async fn empty_query_issues_no_requests() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    assert!(aggregator.aggregate("").await.is_empty());
    assert!(aggregator.aggregate("   ").await.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn maine_coon_catalog_hit() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/search_cfa",
        "maine coon",
        json!([{"name": "Maine Coon", "description": "Large friendly breed", "url": "/cfa/maine-coon"}]),
        Duration::ZERO,
    )
    .await;
    mount_json(&server, "/search_reddit", "maine coon", json!({"results": []}), Duration::ZERO).await;
    mount_json(&server, "/search", "maine coon", json!({"results": []}), Duration::ZERO).await;

    let items = aggregator_for(&server).aggregate("maine coon").await;
    assert_eq!(
        items,
        vec![NormalizedResult {
            title: "Maine Coon".to_string(),
            url: "/cfa/maine-coon".to_string(),
            snippet: "Large friendly breed".to_string(),
            source_type: SourceType::CfaBreedProfile,
            score: None,
        }]
    );
}

#[tokio::test]
async fn order_follows_priority_not_arrival() {
    init_logging();
    let server = MockServer::start().await;
    // The catalog answers last, the article source first.
    mount_json(
        &server,
        "/search_cfa",
        "cat",
        json!([{"name": "Abyssinian", "url": "/cfa/abyssinian"}, {"name": "Bengal", "url": "/cfa/bengal"}]),
        Duration::from_millis(300),
    )
    .await;
    mount_json(
        &server,
        "/search_reddit",
        "cat",
        json!({"results": [{"title": "If it fits", "url": "https://reddit.com/1"}]}),
        Duration::from_millis(150),
    )
    .await;
    mount_json(
        &server,
        "/search",
        "cat",
        json!({"results": [{"title": "Cat", "url": "https://en.wikipedia.org/wiki/Cat", "score": 9.1}]}),
        Duration::ZERO,
    )
    .await;

    let items = aggregator_for(&server).aggregate("cat").await;
    assert_eq!(items.len(), 4);
    assert_eq!(
        summary(&items),
        vec![
            (SourceType::CfaBreedProfile, "Abyssinian".to_string()),
            (SourceType::CfaBreedProfile, "Bengal".to_string()),
            (SourceType::RedditMeme, "If it fits".to_string()),
            (SourceType::WikipediaArticle, "Cat".to_string()),
        ]
    );
}

#[tokio::test]
async fn failing_source_only_drops_its_own_items() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/search_cfa", "tabby", json!([{"name": "Tabby", "url": "/cfa/tabby"}]), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/search_reddit"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/search",
        "tabby",
        json!({"results": [{"title": "Tabby cat", "url": "https://en.wikipedia.org/wiki/Tabby_cat"}]}),
        Duration::ZERO,
    )
    .await;

    let items = aggregator_for(&server).aggregate("tabby").await;
    assert_eq!(
        summary(&items),
        vec![
            (SourceType::CfaBreedProfile, "Tabby".to_string()),
            (SourceType::WikipediaArticle, "Tabby cat".to_string()),
        ]
    );
}

#[tokio::test]
async fn malformed_json_counts_as_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search_cfa"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[{\"name\": ", "application/json"))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/search_reddit",
        "tux",
        json!({"results": [{"title": "Tux meme", "url": "https://reddit.com/2"}]}),
        Duration::ZERO,
    )
    .await;
    mount_json(
        &server,
        "/search",
        "tux",
        json!({"results": [{"title": "Tuxedo cat", "url": "https://en.wikipedia.org/wiki/Tuxedo_cat"}]}),
        Duration::ZERO,
    )
    .await;

    let items = aggregator_for(&server).aggregate("tux").await;
    assert_eq!(
        summary(&items),
        vec![
            (SourceType::RedditMeme, "Tux meme".to_string()),
            (SourceType::WikipediaArticle, "Tuxedo cat".to_string()),
        ]
    );
}

#[tokio::test]
async fn all_sources_failing_yields_empty_list() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let items = aggregator_for(&server).aggregate("anything").await;
    assert!(items.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn unreachable_backend_yields_empty_list() {
    init_logging();
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(FetchSettings {
        connect_timeout: Duration::from_millis(200),
        ..FetchSettings::default()
    })
    .unwrap());
    // Port 9 (discard) is closed on test machines.
    let base = Url::parse("http://127.0.0.1:9/").unwrap();
    let aggregator = Aggregator::over_http(&base, &SourceType::BY_PRIORITY, fetcher);

    assert!(aggregator.aggregate("zzz_no_match").await.is_empty());
}

#[tokio::test]
async fn all_empty_sources_yield_empty_list() {
    init_logging();
    let server = MockServer::start().await;
    mount_json(&server, "/search_cfa", "zzz_no_match", json!([]), Duration::ZERO).await;
    mount_json(&server, "/search_reddit", "zzz_no_match", json!({"results": []}), Duration::ZERO).await;
    mount_json(&server, "/search", "zzz_no_match", json!({"results": []}), Duration::ZERO).await;

    assert!(aggregator_for(&server).aggregate("zzz_no_match").await.is_empty());
}

struct FailingSource;

#[async_trait::async_trait]
impl SearchSource for FailingSource {
    fn source_type(&self) -> SourceType {
        SourceType::RedditMeme
    }

    async fn search(&self, _query: &str) -> Result<Vec<NormalizedResult>, FetchError> {
        Err(FetchError::new(FailureKind::Network, "connection reset"))
    }
}

#[tokio::test]
async fn search_or_empty_folds_errors() {
    init_logging();
    let (source_type, items) = search_or_empty(&FailingSource, "q").await;
    assert_eq!(source_type, SourceType::RedditMeme);
    assert!(items.is_empty());
}
