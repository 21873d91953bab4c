//! Tests for the REST Countries client against an in-process server.

use axum::{Json, Router, http::StatusCode, routing::get};
use flagquiz::{DatasetProvider, FetchError, QuizConfig, RestCountriesClient, start_quiz};
use serde_json::{Value, json};
use std::time::Duration;

/// Spawns `app` on a random port and returns its base URL.
async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

fn countries() -> Value {
    json!([
        {"name": {"common": "France"}, "capital": ["Paris"], "flags": {"svg": "fr.svg"}, "cca2": "FR"},
        {"name": {"common": "Italy"}, "capital": ["Rome"], "flags": {"svg": "it.svg"}, "cca2": "IT"},
        {"name": {"common": "Norway"}, "capital": ["Oslo"], "flags": {"svg": "no.svg"}, "cca2": "NO"},
        {"name": {"common": "Peru"}, "capital": ["Lima"], "flags": {"svg": "pe.svg"}, "cca2": "PE"},
        {"name": {"common": "Japan"}, "capital": ["Tokyo"], "flags": {"svg": "jp.svg"}, "cca2": "JP"},
        {"name": {"common": "Bouvet Island"}, "flags": {"svg": "bv.svg"}, "cca2": "BV"}
    ])
}

fn client(base_url: &str) -> RestCountriesClient {
    RestCountriesClient::new(base_url, Duration::from_secs(5)).expect("client builds")
}

#[test]
fn test_endpoint_requests_needed_fields() {
    let client = client("https://restcountries.com/");
    assert_eq!(
        client.endpoint(),
        "https://restcountries.com/v3.1/all?fields=name,capital,flags,cca2"
    );
}

#[tokio::test]
async fn test_fetches_and_filters_countries() {
    let app = Router::new().route("/v3.1/all", get(|| async { Json(countries()) }));
    let base_url = spawn_app(app).await;

    let records = client(&base_url).load().await.expect("fetch succeeds");
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.display_name() != "Bouvet Island"));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let app = Router::new().route(
        "/v3.1/all",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_app(app).await;

    let err = client(&base_url).load().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_garbage_body_is_decode() {
    let app = Router::new().route("/v3.1/all", get(|| async { "definitely not json" }));
    let base_url = spawn_app(app).await;

    let err = client(&base_url).load().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let app = Router::new().route(
        "/v3.1/all",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(countries())
        }),
    );
    let base_url = spawn_app(app).await;

    let client = RestCountriesClient::new(&base_url, Duration::from_millis(200)).unwrap();
    let err = client.load().await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = client(&format!("http://127.0.0.1:{port}"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_start_quiz_over_http() {
    let app = Router::new().route("/v3.1/all", get(|| async { Json(countries()) }));
    let base_url = spawn_app(app).await;

    let config = QuizConfig::default()
        .with_api_url(base_url)
        .with_question_count(3)
        .with_seed(1);
    let session = start_quiz(&config).await.expect("quiz starts");

    assert_eq!(session.state().total_questions(), 3);
    let question = session.state().current_question().unwrap();
    assert!(question.flag_emoji().is_some());
}
