use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use coursefind::client::{
    HttpTransport, SearchSession, SearchStats, SearchTransport, SessionPhase, TransportError,
};
use coursefind::{InMemoryCorpus, JsonCorpus};

use crate::helpers::fixtures::sample_catalog;
use crate::helpers::test_server::TestServer;

const DEBOUNCE: Duration = Duration::from_millis(50);

fn transport(server: &TestServer) -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new(&server.base_url, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_http_transport_returns_ranked_records() {
    let server = TestServer::start(Arc::new(InMemoryCorpus::new(sample_catalog()))).await;

    let records = transport(&server).search("intro").await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1]);

    server.stop().await;
}

#[tokio::test]
async fn test_http_transport_surfaces_server_error() {
    let corpus = JsonCorpus::from_value(json!({"courses": "missing"}));
    let server = TestServer::start(Arc::new(corpus)).await;

    let err = transport(&server).search("go").await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 500,
            message: "Course data is unavailable".to_string()
        }
    );

    server.stop().await;
}

#[tokio::test]
async fn test_http_transport_unreachable_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = transport.search("go").await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn test_session_end_to_end() {
    let server = TestServer::start(Arc::new(InMemoryCorpus::new(sample_catalog()))).await;
    let handle = SearchSession::new(transport(&server), DEBOUNCE).spawn();
    let mut views = handle.subscribe();

    for value in ["i", "in", "int", "intro"] {
        handle.input(value).unwrap();
    }

    let view = tokio::time::timeout(
        Duration::from_secs(5),
        views.wait_for(|v| v.results_query.is_some() && !v.loading),
    )
    .await
    .expect("session did not settle")
    .unwrap()
    .clone();

    assert_eq!(view.results_query.as_deref(), Some("intro"));
    assert_eq!(view.phase(), SessionPhase::Idle);
    let ids: Vec<_> = view.results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let stats = SearchStats::from_results(&view.results);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.avg_price_display(), "25.00");
    assert_eq!(stats.categories, 2);

    let summary = handle.wait().await.unwrap();
    assert_eq!(summary.requests_sent, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_session_shows_server_failure() {
    let corpus = JsonCorpus::from_value(json!([{"id": 1, "title": "Go", "price": -5}]));
    let server = TestServer::start(Arc::new(corpus)).await;
    let handle = SearchSession::new(transport(&server), DEBOUNCE).spawn();
    let mut views = handle.subscribe();

    handle.input("go").unwrap();

    let view = tokio::time::timeout(
        Duration::from_secs(5),
        views.wait_for(|v| v.phase() == SessionPhase::Error),
    )
    .await
    .expect("session did not fail")
    .unwrap()
    .clone();

    assert!(view.results.is_empty());
    assert!(!view.loading);
    assert_eq!(
        view.error.as_deref(),
        Some("Search failed (500): Course data is unavailable")
    );

    drop(handle);
    server.stop().await;
}
