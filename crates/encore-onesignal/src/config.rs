// OneSignal configuration, loaded from environment variables

use std::env;

/// Default OneSignal REST API base
pub const DEFAULT_API_URL: &str = "https://api.onesignal.com";

/// OneSignal application settings
#[derive(Debug, Clone)]
pub struct OneSignalConfig {
    /// OneSignal application identifier (a UUID)
    pub app_id: String,

    /// REST API key of the application
    pub api_key: String,

    /// API base URL (overridable for tests and proxies)
    pub api_url: String,
}

impl OneSignalConfig {
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Create configuration from environment variables
    ///
    /// Returns None if push is not configured.
    ///
    /// Environment variables:
    /// - `ONESIGNAL_APP_ID`: application identifier
    /// - `ONESIGNAL_API_KEY`: REST API key
    /// - `ONESIGNAL_API_URL`: API base (default: https://api.onesignal.com)
    pub fn from_env() -> Option<Self> {
        let app_id = env::var("ONESIGNAL_APP_ID").ok()?;
        let api_key = env::var("ONESIGNAL_API_KEY").ok()?;

        if app_id.is_empty() || api_key.is_empty() {
            return None;
        }

        let api_url = env::var("ONESIGNAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Some(Self {
            app_id,
            api_key,
            api_url,
        })
    }
}
