//! AI configuration from environment variables.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default rate limit between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Offline mode requires KITCHEN_AI_CACHE_DIR")]
    OfflineWithoutCache,
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the provider.
    pub api_key: String,
    /// Model name (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Directory for caching responses. Caching is off when unset.
    pub cache_dir: Option<PathBuf>,
    /// If true, only use cache, error if not cached.
    pub offline: bool,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key for the provider
    ///
    /// Optional:
    /// - `KITCHEN_AI_MODEL`: Model name (default: "gpt-4o-mini")
    /// - `KITCHEN_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `KITCHEN_AI_CACHE_DIR`: Enables the response cache in this directory
    ///   (`~` expands to the home directory)
    /// - `KITCHEN_AI_OFFLINE`: Use cache only (default: false)
    /// - `KITCHEN_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("KITCHEN_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("KITCHEN_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let cache_dir = env::var("KITCHEN_AI_CACHE_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| expand_home(&v));

        let offline = env::var("KITCHEN_AI_OFFLINE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        if offline && cache_dir.is_none() {
            return Err(ConfigError::OfflineWithoutCache);
        }

        let rate_limit_ms = env::var("KITCHEN_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        Ok(Self {
            api_key,
            model,
            base_url,
            cache_dir,
            offline,
            rate_limit_ms,
        })
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|h| h.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
