// OneSignal client lifecycle
//
// OneSignalClient (configured) --init()--> OneSignalPush (ready)
//
// Only OneSignalPush implements PushCapability, so the service can never hold
// a provider handle that skipped initialization.

use async_trait::async_trait;
use encore_core::{EncoreError, PushCapability, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use crate::config::OneSignalConfig;
use crate::types::OneSignalUser;

/// Configured but not yet initialized OneSignal client
#[derive(Debug, Clone)]
pub struct OneSignalClient {
    config: OneSignalConfig,
}

impl OneSignalClient {
    pub fn new(config: OneSignalConfig) -> Self {
        Self { config }
    }

    /// Validate the configuration and produce a ready capability
    pub async fn init(self) -> Result<OneSignalPush> {
        let OneSignalConfig {
            app_id,
            api_key,
            api_url,
        } = self.config;

        Uuid::parse_str(&app_id)
            .map_err(|_| EncoreError::config("ONESIGNAL_APP_ID must be a UUID"))?;
        if api_key.trim().is_empty() {
            return Err(EncoreError::config("ONESIGNAL_API_KEY is empty"));
        }
        reqwest::Url::parse(&api_url)
            .map_err(|e| EncoreError::config(format!("invalid OneSignal API URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Key {}", api_key))
            .map_err(|_| EncoreError::config("ONESIGNAL_API_KEY contains invalid characters"))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| EncoreError::config(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(app_id = %app_id, "OneSignal push capability initialized");

        Ok(OneSignalPush {
            client,
            app_id,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Initialized OneSignal push capability
#[derive(Debug, Clone)]
pub struct OneSignalPush {
    client: Client,
    app_id: String,
    api_url: String,
}

impl OneSignalPush {
    /// Look up the OneSignal user registered under our user id
    pub async fn fetch_user(&self, user_id: Uuid) -> Result<Option<OneSignalUser>> {
        let url = format!(
            "{}/apps/{}/users/by/external_id/{}",
            self.api_url, self.app_id, user_id
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(user_id = %user_id, "OneSignal request failed: {}", e);
            EncoreError::push_unavailable(e.to_string())
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let user = response.json::<OneSignalUser>().await.map_err(|e| {
                    EncoreError::push_unavailable(format!("unreadable OneSignal response: {}", e))
                })?;
                Ok(Some(user))
            }
            status => {
                tracing::error!(
                    status = %status,
                    user_id = %user_id,
                    "OneSignal user lookup failed"
                );
                Err(EncoreError::push_unavailable(format!(
                    "OneSignal returned status {}",
                    status
                )))
            }
        }
    }
}

#[async_trait]
impl PushCapability for OneSignalPush {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    async fn is_push_supported(&self, user_id: Uuid) -> Result<bool> {
        Ok(self
            .fetch_user(user_id)
            .await?
            .is_some_and(|user| user.has_push_subscription()))
    }

    async fn request_permission(&self, user_id: Uuid) -> Result<bool> {
        Ok(self
            .fetch_user(user_id)
            .await?
            .is_some_and(|user| user.has_granted_push()))
    }
}
