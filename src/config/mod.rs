//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_TICKER: &str = "BTCUSD";

/// Current deployment environment (`production`, `sandbox`, ...)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string())
}

/// Which persisted store adapter backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File,
    Redis,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StoreBackend::Memory),
            "file" => Some(StoreBackend::File),
            "redis" => Some(StoreBackend::Redis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub search_grounding: bool,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_search_grounding(mut self, enabled: bool) -> Self {
        self.search_grounding = enabled;
        self
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let timeout_seconds = env::var("GEMINI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(120);

        Self {
            api_key,
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            search_grounding: env::var("GEMINI_SEARCH_GROUNDING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            search_grounding: true,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Application configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
    pub profile: String,
    pub redis_url: String,
    pub default_ticker: String,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|b| StoreBackend::parse(&b))
                .unwrap_or(StoreBackend::File),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".crypto-analyst")),
            profile: env::var("PROFILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| "default".to_string()),
            redis_url: get_redis_url(),
            default_ticker: env::var("DEFAULT_TICKER")
                .unwrap_or_else(|_| DEFAULT_TICKER.to_string()),
            gemini: GeminiConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from(".crypto-analyst"),
            profile: "default".to_string(),
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            gemini: GeminiConfig::default(),
        }
    }
}
