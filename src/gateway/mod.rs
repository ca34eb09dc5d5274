// src/gateway/mod.rs
//! Proxy gateway: forwards headline/verification requests to the provider and
//! normalizes every failure into `{ "error": "..." }`.
//!
//! Upstream failures always map to HTTP 500, whatever the provider answered.
//! Nothing is retried or cached.

pub mod pages;
pub mod provider;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde_json::{json, Value};

use crate::config::GatewayConfig;
pub use pages::{FixedPage, PagePicker, RandomPages, SeededPages};
pub use provider::{NewsApiProvider, NewsProvider, ProviderError, ProviderReply};

pub const MISSING_QUERY_MESSAGE: &str = "Missing query parameter";

/// Which gateway operation failed; decides the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Headlines,
    Verify,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Headlines => "news",
            Endpoint::Verify => "verify-news",
        }
    }

    pub fn fallback_message(self) -> &'static str {
        match self {
            Endpoint::Headlines => "Failed to fetch news",
            Endpoint::Verify => "Failed to verify news",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Missing query parameter")]
    MissingQuery,

    #[error("provider answered with status {status}")]
    Upstream {
        endpoint: Endpoint,
        status: u16,
        message: Option<String>,
    },

    #[error("{}", .endpoint.fallback_message())]
    Provider {
        endpoint: Endpoint,
        #[source]
        source: ProviderError,
    },
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingQuery => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { .. } | GatewayError::Provider { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message put into the JSON body. Underlying causes are not exposed.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::MissingQuery => MISSING_QUERY_MESSAGE.to_string(),
            GatewayError::Upstream {
                endpoint, message, ..
            } => message
                .clone()
                .unwrap_or_else(|| endpoint.fallback_message().to_string()),
            GatewayError::Provider { endpoint, .. } => endpoint.fallback_message().to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Stateless relay. Cheap to clone; everything inside is shared read-only.
#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn NewsProvider>,
    pages: Arc<dyn PagePicker>,
    headlines_page_size: u32,
    verify_page_size: u32,
    max_page: u32,
}

impl Gateway {
    pub fn new(
        cfg: &GatewayConfig,
        provider: Arc<dyn NewsProvider>,
        pages: Arc<dyn PagePicker>,
    ) -> Self {
        Self {
            provider,
            pages,
            headlines_page_size: cfg.headlines_page_size,
            verify_page_size: cfg.verify_page_size,
            max_page: cfg.max_page,
        }
    }

    /// Production wiring: newsapi.org provider and OS-seeded pages.
    pub fn from_config(cfg: &GatewayConfig) -> anyhow::Result<Self> {
        let provider = NewsApiProvider::new(cfg)?;
        Ok(Self::new(cfg, Arc::new(provider), Arc::new(RandomPages)))
    }

    /// Top headlines from a freshly drawn page, body returned verbatim.
    pub async fn headlines(&self) -> Result<Value, GatewayError> {
        counter!("gateway_requests_total", "endpoint" => Endpoint::Headlines.as_str()).increment(1);
        let page = self.pages.pick(self.max_page);
        let reply = self
            .provider
            .top_headlines(page, self.headlines_page_size)
            .await;
        tracing::info!(page, "headlines requested");
        finish(Endpoint::Headlines, reply)
    }

    /// Search the provider for `query`; blank or absent queries never leave the process.
    pub async fn verify(&self, query: Option<&str>) -> Result<Value, GatewayError> {
        counter!("gateway_requests_total", "endpoint" => Endpoint::Verify.as_str()).increment(1);
        let query = query
            .filter(|q| !q.is_empty())
            .ok_or(GatewayError::MissingQuery)?;
        let reply = self.provider.search(query, self.verify_page_size).await;
        finish(Endpoint::Verify, reply)
    }
}

fn finish(
    endpoint: Endpoint,
    reply: Result<ProviderReply, ProviderError>,
) -> Result<Value, GatewayError> {
    let err = match reply {
        Ok(r) if r.is_success() => return Ok(r.body),
        Ok(r) => GatewayError::Upstream {
            endpoint,
            status: r.status,
            message: r.message().map(str::to_string),
        },
        Err(source) => GatewayError::Provider { endpoint, source },
    };
    counter!("gateway_upstream_failures_total", "endpoint" => endpoint.as_str()).increment(1);
    tracing::warn!(
        endpoint = endpoint.as_str(),
        error = %error_chain(&err),
        "upstream failure"
    );
    Err(err)
}

/// `err` followed by each of its sources, joined with ": ".
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut next = err.source();
    while let Some(cause) = next {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        next = cause.source();
    }
    out
}
