//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default wait before re-checking the backend for a missing user.
pub const DEFAULT_PROVISIONING_RACE_DELAY_MS: u64 = 1000;

/// Default per-request timeout for backend API calls.
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 10_000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend user/subscription API
    pub backend_url: String,
    /// Upper bound on any single backend request
    pub backend_timeout: Duration,
    /// Hosted billing portal the dashboard links out to
    pub billing_portal_url: String,
    /// Product name shown by the dashboard
    pub app_name: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// JSON file backing the persistent local store
    pub local_store_path: PathBuf,
    /// How long the reconciler waits for an external sync before creating a user
    pub provisioning_race_delay: Duration,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Config for tests only. The race delay is zero so tests never sleep.
    pub fn test_default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            backend_timeout: Duration::from_secs(2),
            billing_portal_url: "https://billing.example.com/portal".to_string(),
            app_name: "Test SaaS App".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            local_store_path: PathBuf::from("data/test_local_store.json"),
            provisioning_race_delay: Duration::ZERO,
            port: 8080,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let race_delay_ms =
            millis_from_env("PROVISIONING_RACE_DELAY_MS", DEFAULT_PROVISIONING_RACE_DELAY_MS)?;
        let backend_timeout_ms = millis_from_env("BACKEND_TIMEOUT_MS", DEFAULT_BACKEND_TIMEOUT_MS)?;
        if backend_timeout_ms == 0 {
            return Err(ConfigError::Invalid("BACKEND_TIMEOUT_MS", "0".to_string()));
        }

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            backend_timeout: Duration::from_millis(backend_timeout_ms),
            billing_portal_url: env::var("BILLING_PORTAL_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BILLING_PORTAL_URL"))?,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "My SaaS App".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            local_store_path: env::var("LOCAL_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/local_store.json")),
            provisioning_race_delay: Duration::from_millis(race_delay_ms),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Read a millisecond count, falling back to `default` when unset.
fn millis_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(name, v)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
