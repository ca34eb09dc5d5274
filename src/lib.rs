// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod classifier;
pub mod config;
pub mod gateway;
pub mod headlines;
pub mod metrics;
pub mod view;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::classifier::{classify, AnalysisResult, Sentiment};
pub use crate::config::GatewayConfig;
pub use crate::headlines::{filter_credible, NewsArticle, RawArticle};

use axum::Router;
use tracing::info;

/// Build the full application router from `config/gateway.toml` + environment,
/// including `/metrics`.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = GatewayConfig::load_default()?;
    let state = AppState::from_config(&cfg)?;
    let metrics = crate::metrics::Metrics::init()?;
    info!(
        base_url = %cfg.base_url,
        max_page = cfg.max_page,
        analyze_delay_ms = cfg.analyze_delay_ms,
        "gateway configured"
    );
    Ok(create_router(state).merge(metrics.router()))
}
