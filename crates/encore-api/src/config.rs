// Server configuration
//
// Read once at startup, after `.env` has been loaded.

use anyhow::Result;
use encore_onesignal::OneSignalConfig;
use std::env;

use crate::auth::AuthConfig;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// Configuration of the API server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL URL; in-memory storage when None
    pub database_url: Option<String>,

    /// Base URL of the ingestion API; events are read from the database when None
    pub events_api_url: Option<String>,

    /// Push provider settings; subscribing is unavailable when None
    pub onesignal: Option<OneSignalConfig>,

    pub auth: AuthConfig,

    /// Prefix for all API routes (e.g. "/api")
    pub api_prefix: String,

    /// Origins allowed by CORS; same-origin only when empty
    pub cors_allowed_origins: Vec<String>,

    pub bind_addr: String,
}

impl AppConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (optional)
    /// - `EVENTS_API_URL`: ingestion API base URL (optional)
    /// - `ONESIGNAL_APP_ID`, `ONESIGNAL_API_KEY`, `ONESIGNAL_API_URL`: push provider (optional)
    /// - `AUTH_JWT_SECRET`, `AUTH_JWT_AUDIENCE`: session token validation
    /// - `API_PREFIX`: route prefix (default: none)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins (default: none)
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:9000)
    ///
    /// Fails when `DATABASE_URL` is set without `AUTH_JWT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let database_url = non_empty_var("DATABASE_URL");
        let auth = AuthConfig::from_env(database_url.is_some())?;

        Ok(Self {
            database_url,
            events_api_url: non_empty_var("EVENTS_API_URL"),
            onesignal: OneSignalConfig::from_env(),
            auth,
            api_prefix: env::var("API_PREFIX").unwrap_or_default(),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
            bind_addr: non_empty_var("BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
