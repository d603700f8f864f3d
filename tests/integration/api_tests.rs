use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use coursefind::{InMemoryCorpus, JsonCorpus};

use crate::helpers::fixtures::{course, python_flood, sample_catalog};
use crate::helpers::test_server::test_router;

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, cache_control, body)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

fn sample_router() -> axum::Router {
    test_router(Arc::new(InMemoryCorpus::new(sample_catalog())))
}

#[tokio::test]
async fn test_intro_ranks_prefix_before_description() {
    let (status, _, body) = get(sample_router(), "/api/search?q=Intro").await;

    assert_eq!(status, StatusCode::OK);
    // "Intro to Go" (title prefix) before "Advanced Go" (description only)
    assert_eq!(ids(&body), vec![2, 1]);
}

#[tokio::test]
async fn test_blank_query_returns_empty_array() {
    for uri in ["/api/search?q=", "/api/search?q=%20%20%09"] {
        let (status, _, body) = get(sample_router(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn test_blank_query_succeeds_even_with_malformed_corpus() {
    let router = test_router(Arc::new(JsonCorpus::from_value(json!({"oops": true}))));
    let (status, _, body) = get(router, "/api/search?q=+").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_missing_query_is_bad_request() {
    let (status, cache_control, body) = get(sample_router(), "/api/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'q'"));
    assert!(cache_control.is_none());
}

#[tokio::test]
async fn test_repeated_query_parameter_is_bad_request() {
    let (status, _, body) = get(sample_router(), "/api/search?q=go&q=rust").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_corpus_is_internal_error() {
    let router = test_router(Arc::new(JsonCorpus::from_value(json!("not a list"))));
    let (status, _, body) = get(router, "/api/search?q=go").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Course data is unavailable");
}

#[tokio::test]
async fn test_results_have_no_score_field() {
    let (_, _, body) = get(sample_router(), "/api/search?q=data").await;

    let records = body.as_array().unwrap();
    assert!(!records.is_empty());
    for record in records {
        let object = record.as_object().unwrap();
        assert!(!object.contains_key("score"));
        for key in ["id", "title", "description", "category", "price", "instructor"] {
            assert!(object.contains_key(key), "missing {}", key);
        }
    }
}

#[tokio::test]
async fn test_category_and_instructor_scores_add_up() {
    // category + instructor = 6: below a title prefix (10), above a
    // description match (1)
    let corpus = vec![
        course(1, "Statistics", "Data", "Data Dana", ""),
        course(2, "Database Design", "", "", ""),
        course(3, "Learning", "", "", "data heavy"),
    ];
    let router = test_router(Arc::new(InMemoryCorpus::new(corpus)));
    let (_, _, body) = get(router, "/api/search?q=data").await;

    assert_eq!(ids(&body), vec![2, 1, 3]);
}

#[tokio::test]
async fn test_result_cap_keeps_best_matches() {
    let mut corpus = python_flood(70);
    corpus.push(course(1, "Python Crash Course", "", "", ""));
    corpus.push(course(2, "Effective Python", "", "", ""));
    let router = test_router(Arc::new(InMemoryCorpus::new(corpus)));

    let (_, _, body) = get(router, "/api/search?q=python").await;
    let ids = ids(&body);

    assert_eq!(ids.len(), 50);
    assert_eq!(&ids[..2], &[1, 2]);
    assert_eq!(ids[2..].to_vec(), (1000..1048).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_success_advertises_cache_window() {
    let (_, cache_control, _) = get(sample_router(), "/api/search?q=go").await;

    assert_eq!(
        cache_control.as_deref(),
        Some("public, s-maxage=60, stale-while-revalidate=30")
    );
}

#[tokio::test]
async fn test_url_encoded_query() {
    let corpus = vec![course(1, "C++ & You", "", "", "")];
    let router = test_router(Arc::new(InMemoryCorpus::new(corpus)));

    let (_, _, body) = get(router, "/api/search?q=c%2B%2B%20%26").await;
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_health_reports_catalog_size() {
    let (status, _, body) = get(sample_router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 5);
}
