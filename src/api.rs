use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::classifier::{self, AnalysisResult};
use crate::config::GatewayConfig;
use crate::gateway::{Gateway, GatewayError};
use crate::headlines::{self, NewsArticle};
use crate::view::FEED_ERROR_MESSAGE;

#[derive(Clone)]
pub struct AppState {
    gateway: Gateway,
    analyze_delay: Duration,
}

impl AppState {
    pub fn new(gateway: Gateway, analyze_delay: Duration) -> Self {
        Self {
            gateway,
            analyze_delay,
        }
    }

    pub fn from_config(cfg: &GatewayConfig) -> anyhow::Result<Self> {
        Ok(Self::new(Gateway::from_config(cfg)?, cfg.analyze_delay()))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/news", get(news))
        .route("/api/verify-news", get(verify_news))
        .route("/api/analyze", post(analyze))
        .route("/api/latest-news", get(latest_news))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn news(State(state): State<AppState>) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.gateway.headlines().await?))
}

async fn verify_news(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Value>, GatewayError> {
    let query = q.get("q").map(String::as_str);
    Ok(Json(state.gateway.verify(query).await?))
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: String,
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "analyze body rejected");
            return error_body(StatusCode::BAD_REQUEST, "Missing text");
        }
    };
    if body.text.trim().is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "Missing text");
    }
    let result: AnalysisResult =
        classifier::classify_with_delay(&body.text, state.analyze_delay).await;
    tracing::info!(
        is_real = result.is_real,
        confidence = result.confidence,
        "text analyzed"
    );
    Json(result).into_response()
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LatestNewsResp {
    articles: Vec<NewsArticle>,
    fetched_at: DateTime<Utc>,
}

async fn latest_news(State(state): State<AppState>) -> Response {
    let body = match state.gateway.headlines().await {
        Ok(body) => body,
        Err(_) => return error_body(StatusCode::INTERNAL_SERVER_ERROR, FEED_ERROR_MESSAGE),
    };
    let records = match headlines::parse_feed(&body) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "headline feed unusable");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, FEED_ERROR_MESSAGE);
        }
    };
    Json(LatestNewsResp {
        articles: headlines::filter_credible(&records),
        fetched_at: Utc::now(),
    })
    .into_response()
}
