// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: Without a backing database there are no real sessions, so a random
// per-process secret is used; with a database the backend secret is required

use anyhow::{bail, Result};
use rand::Rng;
use std::time::Duration;

/// Audience the managed backend puts on tokens of signed-in users
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret the backend signs access tokens with
    pub secret: String,
    /// Expected `aud` claim; None disables the audience check
    pub audience: Option<String>,
    /// Lifetime of tokens minted by this service (tests and local tooling)
    pub access_token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            audience: Some(DEFAULT_AUDIENCE.to_string()),
            access_token_lifetime: Duration::from_secs(60 * 60), // 1 hour
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// `require_secret` is set when a real backend is configured; a missing
    /// secret is then a startup error.
    ///
    /// Environment variables:
    /// - `AUTH_JWT_SECRET`: backend JWT secret
    /// - `AUTH_JWT_AUDIENCE`: expected audience (default: "authenticated", empty disables)
    pub fn from_env(require_secret: bool) -> Result<Self> {
        Self::from_values(
            std::env::var("AUTH_JWT_SECRET").ok(),
            std::env::var("AUTH_JWT_AUDIENCE").ok(),
            require_secret,
        )
    }

    fn from_values(
        secret: Option<String>,
        audience: Option<String>,
        require_secret: bool,
    ) -> Result<Self> {
        let secret = match secret.filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if require_secret => {
                bail!("AUTH_JWT_SECRET must be set when DATABASE_URL is configured")
            }
            None => {
                tracing::warn!("AUTH_JWT_SECRET not set, using a random per-process secret");
                random_secret()
            }
        };

        let audience = match audience {
            Some(aud) if aud.is_empty() => None,
            Some(aud) => Some(aud),
            None => Some(DEFAULT_AUDIENCE.to_string()),
        };

        Ok(Self {
            jwt: JwtConfig {
                secret,
                audience,
                ..Default::default()
            },
        })
    }

    /// Configuration with a fixed secret, for tests and local tooling
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig {
                secret: secret.into(),
                ..Default::default()
            },
        }
    }
}

fn random_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}
