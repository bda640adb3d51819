//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::account::AccountId;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Sportsbook Backend ===
    /// Base URL of the storefront REST API.
    #[serde(default = "default_api_url")]
    pub sportsbook_api_url: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Session ===
    /// Account used when a command does not name one.
    #[serde(default)]
    pub account_id: Option<AccountId>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_http_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sportsbook_api_url: default_api_url(),
            http_timeout_ms: default_http_timeout_ms(),
            account_id: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.sportsbook_api_url.starts_with("http://")
            || self.sportsbook_api_url.starts_with("https://"))
        {
            return Err("SPORTSBOOK_API_URL must start with http:// or https://".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// API base URL without a trailing slash.
    pub fn api_base_url(&self) -> &str {
        self.sportsbook_api_url.trim_end_matches('/')
    }
}
