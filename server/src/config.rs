//! Server configuration from environment variables.

use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SITE_URL: &str = "https://www.travelkitchen.app";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: String,
    /// Public base URL, used for sitemap and robots links.
    pub site_url: String,
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Use the fake AI client instead of a real provider.
    pub fake_ai: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `KITCHEN_BIND_ADDR` (default: "0.0.0.0:3000")
    /// - `KITCHEN_SITE_URL` (default: "https://www.travelkitchen.app")
    /// - `DATABASE_URL` (optional)
    /// - `KITCHEN_AI_FAKE` (optional, "1" or "true")
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("KITCHEN_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let site_url = env::var("KITCHEN_SITE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let fake_ai = env::var("KITCHEN_AI_FAKE")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        Self {
            bind_addr,
            site_url,
            database_url,
            fake_ai,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            database_url: None,
            fake_ai: false,
        }
    }
}
