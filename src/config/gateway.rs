// src/config/gateway.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const ENV_CONFIG_PATH: &str = "GATEWAY_CONFIG_PATH";
pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_headlines_page_size() -> u32 {
    15
}
fn default_verify_page_size() -> u32 {
    5
}
fn default_max_page() -> u32 {
    5
}
fn default_analyze_delay_ms() -> u64 {
    2000
}
fn default_api_key() -> String {
    "ENV".to_string()
}

/// Gateway settings. Every field has a default, so an absent file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Provider root, e.g. `https://newsapi.org/v2`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_headlines_page_size")]
    pub headlines_page_size: u32,
    #[serde(default = "default_verify_page_size")]
    pub verify_page_size: u32,
    /// Headlines page is drawn uniformly from `1..=max_page`.
    #[serde(default = "default_max_page")]
    pub max_page: u32,
    #[serde(default = "default_analyze_delay_ms")]
    pub analyze_delay_ms: u64,
    /// "ENV" means: read from NEWS_API_KEY.
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            headlines_page_size: default_headlines_page_size(),
            verify_page_size: default_verify_page_size(),
            max_page: default_max_page(),
            analyze_delay_ms: default_analyze_delay_ms(),
            api_key: default_api_key(),
        }
    }
}

impl GatewayConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: GatewayConfig = toml::from_str(s).context("parsing gateway config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading gateway config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Load using env var + fallbacks:
    /// 1) $GATEWAY_CONFIG_PATH (must exist)
    /// 2) config/gateway.toml
    /// 3) built-in defaults
    ///
    /// The API key is resolved afterwards; see [`GatewayConfig::resolve_api_key`].
    pub fn load_default() -> Result<Self> {
        let cfg = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from_file(&default_p)?
            } else {
                Self::default()
            }
        };
        cfg.resolve_api_key()
    }

    /// Replace an "ENV" placeholder with the value of NEWS_API_KEY.
    pub fn resolve_api_key(mut self) -> Result<Self> {
        if self.api_key.trim().eq_ignore_ascii_case("env") {
            self.api_key =
                env::var(ENV_API_KEY).map_err(|_| anyhow!("Missing {ENV_API_KEY} env var"))?;
        }
        Ok(self)
    }

    pub fn analyze_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_delay_ms)
    }

    fn sanitized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            self.base_url = default_base_url();
        }
        if self.language.trim().is_empty() {
            self.language = default_language();
        }
        if self.headlines_page_size == 0 {
            self.headlines_page_size = default_headlines_page_size();
        }
        if self.verify_page_size == 0 {
            self.verify_page_size = default_verify_page_size();
        }
        if self.max_page == 0 {
            self.max_page = default_max_page();
        }
        self
    }
}
