// Error types for the Encore domain

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, EncoreError>;

/// Errors that can occur while serving events, reviews and notifications
#[derive(Debug, Error)]
pub enum EncoreError {
    /// Upstream ingestion API answered with a non-success status
    #[error("Upstream returned status {status}")]
    Upstream { status: u16 },

    /// Network failure talking to an external collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend store error
    #[error("Store error: {0}")]
    Store(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Signed-in user may not touch this record
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Input rejected at the boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Push capability reports no push support for the user
    #[error("Push notifications are not supported")]
    PushUnsupported,

    /// User did not grant push permission
    #[error("Push permission was not granted")]
    PermissionDenied,

    /// Push capability missing or provider unreachable
    #[error("Push service unavailable: {0}")]
    PushUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EncoreError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        EncoreError::Transport(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl std::fmt::Display) -> Self {
        EncoreError::Store(msg.to_string())
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        EncoreError::NotFound(what.into())
    }

    /// Create a forbidden error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        EncoreError::Forbidden(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EncoreError::Validation(msg.into())
    }

    /// Create a push unavailable error
    pub fn push_unavailable(msg: impl Into<String>) -> Self {
        EncoreError::PushUnavailable(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EncoreError::Configuration(msg.into())
    }
}
