// In-memory implementations for examples and testing
//
// These implementations keep all data in memory, making them useful for:
// - Unit tests of services and routes
// - Running the API without an ingestion API or push provider

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EncoreError, Result};
use crate::event::{sort_by_start, Event};
use crate::traits::{EventSource, PushCapability};

// ============================================================================
// InMemoryEventSource - Serves a fixed event list
// ============================================================================

/// In-memory event source
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventSource {
    events: Arc<RwLock<Vec<Event>>>,
    failing: Arc<RwLock<bool>>,
}

impl InMemoryEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
            failing: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every fetch fail, to exercise error paths
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    async fn check(&self) -> Result<()> {
        if *self.failing.read().await {
            return Err(EncoreError::transport("in-memory source set to fail"));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSource for InMemoryEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        self.check().await?;
        let mut events = self.events.read().await.clone();
        sort_by_start(&mut events);
        Ok(events)
    }

    async fn fetch_event_by_id(&self, id: &str) -> Result<Option<Event>> {
        self.check().await?;
        Ok(self.events.read().await.iter().find(|e| e.id == id).cloned())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

// ============================================================================
// StaticPushCapability - Push capability with fixed answers
// ============================================================================

/// Push capability that answers from configured user sets
#[derive(Debug, Default, Clone)]
pub struct StaticPushCapability {
    app_id: String,
    supported: Arc<RwLock<HashSet<Uuid>>>,
    granted: Arc<RwLock<HashSet<Uuid>>>,
}

impl StaticPushCapability {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }

    /// Register a user with push support and granted permission
    pub async fn grant(&self, user_id: Uuid) {
        self.supported.write().await.insert(user_id);
        self.granted.write().await.insert(user_id);
    }

    /// Register a user with push support who declined permission
    pub async fn deny(&self, user_id: Uuid) {
        self.supported.write().await.insert(user_id);
        self.granted.write().await.remove(&user_id);
    }
}

#[async_trait]
impl PushCapability for StaticPushCapability {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    async fn is_push_supported(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.supported.read().await.contains(&user_id))
    }

    async fn request_permission(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.granted.read().await.contains(&user_id))
    }
}
