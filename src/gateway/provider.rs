// src/gateway/provider.rs
//! Upstream news-search provider.
//!
//! The provider is asked for raw JSON only; status handling and error
//! normalization live in [`super::Gateway`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::GatewayConfig;

/// Raw upstream answer: HTTP status plus the decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: Value,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The provider's own error message, if it sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }
}

/// Request URLs carry the credential, so wrapped `reqwest` errors are stored
/// with their URL stripped.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed")]
    Transport(#[source] reqwest::Error),

    #[error("provider body is not JSON")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// "Top headlines" listing.
    async fn top_headlines(&self, page: u32, page_size: u32)
        -> Result<ProviderReply, ProviderError>;

    /// Free-text "everything" search.
    async fn search(&self, query: &str, page_size: u32) -> Result<ProviderReply, ProviderError>;

    fn name(&self) -> &'static str;
}

/// newsapi.org-compatible provider. The key travels as the `apiKey` query parameter.
pub struct NewsApiProvider {
    http: Client,
    base_url: String,
    language: String,
    api_key: String,
}

impl NewsApiProvider {
    pub fn new(cfg: &GatewayConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("building provider http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
            language: cfg.language.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ProviderReply, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let status = resp.status().as_u16();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url()))?;
        tracing::debug!(provider = self.name(), path, status, "provider replied");
        Ok(ProviderReply { status, body })
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    async fn top_headlines(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ProviderReply, ProviderError> {
        self.get_json(
            "top-headlines",
            &[
                ("language", self.language.clone()),
                ("pageSize", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search(&self, query: &str, page_size: u32) -> Result<ProviderReply, ProviderError> {
        self.get_json(
            "everything",
            &[
                ("q", query.to_string()),
                ("language", self.language.clone()),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}
