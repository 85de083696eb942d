// Core traits for pluggable backends
//
// These traits allow the service to be wired with different collaborators:
// - HTTP ingestion API or database as the event source
// - OneSignal or an in-memory stub as the push capability

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::event::Event;

// ============================================================================
// EventSource - Where events are read from
// ============================================================================

/// Read access to events
///
/// Implementations:
/// - `HttpEventSource`: upstream ingestion API, payload coerced per field
/// - database-backed source in the storage crate
/// - `InMemoryEventSource` for tests
#[async_trait]
pub trait EventSource: Send + Sync {
    /// All events, ordered by ascending start time
    async fn fetch_events(&self) -> Result<Vec<Event>>;

    /// One event, or None when it does not exist
    async fn fetch_event_by_id(&self, id: &str) -> Result<Option<Event>>;

    /// Short name for logs and the health endpoint
    fn kind(&self) -> &'static str;
}

// ============================================================================
// PushCapability - Narrow view of the push provider
// ============================================================================

/// A ready-to-use push provider.
///
/// Values implementing this trait only exist after the provider's
/// initialization step succeeded; an uninitialized client cannot be passed
/// where a `PushCapability` is expected.
#[async_trait]
pub trait PushCapability: Send + Sync {
    /// Provider application this capability is bound to
    fn app_id(&self) -> &str;

    /// Whether the user has a push-capable subscription registered
    async fn is_push_supported(&self, user_id: Uuid) -> Result<bool>;

    /// Whether the user granted push permission
    async fn request_permission(&self, user_id: Uuid) -> Result<bool>;
}
