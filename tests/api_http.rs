// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening a listening socket
// for the app itself. The provider is a wiremock server.
//
// Covered:
// - GET  /health
// - GET  /api/news
// - GET  /api/verify-news
// - POST /api/analyze

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fake_news_detector::api::{create_router, AppState};
use fake_news_detector::config::GatewayConfig;
use fake_news_detector::gateway::{FixedPage, Gateway, NewsApiProvider};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests
const API_KEY: &str = "test-key-123";

/// Router wired to `base_url` with a pinned headlines page and no analyze delay.
fn test_router(base_url: &str) -> Router {
    let cfg = GatewayConfig {
        base_url: base_url.to_string(),
        api_key: API_KEY.to_string(),
        analyze_delay_ms: 0,
        ..GatewayConfig::default()
    };
    let provider = NewsApiProvider::new(&cfg).expect("provider client");
    let gateway = Gateway::new(&cfg, Arc::new(provider), Arc::new(FixedPage(2)));
    create_router(AppState::new(gateway, cfg.analyze_delay()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET")
}

fn post_json(uri: &str, payload: Json) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST")
}

#[tokio::test]
async fn health_returns_ok() {
    let server = MockServer::start().await;
    let (status, body) = send(test_router(&server.uri()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn news_relays_provider_body_verbatim() {
    let server = MockServer::start().await;
    let provider_body = json!({
        "status": "ok",
        "totalResults": 1,
        "articles": [{
            "title": "Budget passes",
            "description": null,
            "url": "https://a.example.com/1",
            "publishedAt": "2025-03-14T09:30:00Z",
            "source": {"id": null, "name": "AP"},
            "urlToImage": "https://img.example.com/1.jpg"
        }]
    });
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("language", "en"))
        .and(query_param("pageSize", "15"))
        .and(query_param("page", "2"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(test_router(&server.uri()), get("/api/news")).await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).expect("json body");
    assert_eq!(v, provider_body);
}

#[tokio::test]
async fn news_provider_error_becomes_500_with_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid or incorrect."
        })))
        .mount(&server)
        .await;

    let (status, body) = send(test_router(&server.uri()), get("/api/news")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v, json!({"error": "Your API key is invalid or incorrect."}));
    assert!(!body.contains(API_KEY), "api key leaked: {body}");
}

#[tokio::test]
async fn news_network_failure_uses_generic_message() {
    // Bind and release a port so nothing is listening on it.
    let dead_uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };

    let (status, body) = send(test_router(&dead_uri), get("/api/news")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to fetch news"}"#);
}

#[tokio::test]
async fn news_non_json_success_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let (status, body) = send(test_router(&server.uri()), get("/api/news")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to fetch news"}"#);
}

#[tokio::test]
async fn verify_without_query_is_400_and_never_calls_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"articles": []})))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/api/verify-news", "/api/verify-news?q=", "/api/verify-news?other=1"] {
        let (status, body) = send(test_router(&server.uri()), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body, r#"{"error":"Missing query parameter"}"#, "uri {uri}");
    }
}

#[tokio::test]
async fn verify_forwards_decoded_query_with_page_size_five() {
    let server = MockServer::start().await;
    let provider_body = json!({"status": "ok", "totalResults": 0, "articles": []});
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "climate change & oceans"))
        .and(query_param("language", "en"))
        .and(query_param("pageSize", "5"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        test_router(&server.uri()),
        get("/api/verify-news?q=climate%20change%20%26%20oceans"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Json>(&body).unwrap(), provider_body);
}

#[tokio::test]
async fn verify_provider_error_without_message_uses_verify_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let (status, body) = send(test_router(&server.uri()), get("/api/verify-news?q=eclipse")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Failed to verify news"}"#);
}

#[tokio::test]
async fn analyze_returns_result_in_ui_shape() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri());

    let (status, body) = send(
        app.clone(),
        post_json(
            "/api/analyze",
            json!({"text": "SHOCKING! Doctors Don't Want You to Know This ONE Weird Trick!!!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v["isReal"], false);
    assert_eq!(v["sentiment"], "Sensationalized");
    assert_eq!(v["confidence"], 95);
    let explanation = v["explanation"].as_array().expect("explanation array");
    assert!(explanation
        .iter()
        .any(|e| e == "Excessive punctuation often indicates sensationalized content"));

    let (status, body) = send(
        app,
        post_json(
            "/api/analyze",
            json!({"text": "According to a peer-reviewed study published by Stanford University researchers, climate change continues to accelerate."}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v["isReal"], true);
    assert_eq!(v["sentiment"], "Neutral");
}

#[tokio::test]
async fn analyze_rejects_blank_text() {
    let server = MockServer::start().await;
    let (status, body) = send(
        test_router(&server.uri()),
        post_json("/api/analyze", json!({"text": "  \n "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Missing text"}"#);
}

#[tokio::test]
async fn analyze_rejects_unusable_body_with_json_error() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri());

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .body(Body::from(r#"{"text":"hello"}"#))
        .expect("build POST");
    let not_json = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from("text=hello"))
        .expect("build POST");

    for req in [no_content_type, not_json] {
        let (status, body) = send(app.clone(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Missing text"}"#);
    }
}
