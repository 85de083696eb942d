// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// StorageBackend works with either PostgreSQL (production) or in-memory
// (dev mode) storage.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::memory::InMemoryDatabase;
use crate::models::*;
use crate::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        tracing::info!("Connected to PostgreSQL storage backend");
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        tracing::info!("Using in-memory storage backend");
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        match self {
            Self::Postgres(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_events().await,
            Self::InMemory(db) => db.list_events().await,
        }
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        match self {
            Self::Postgres(db) => db.create_review(input).await,
            Self::InMemory(db) => db.create_review(input).await,
        }
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.get_review(id).await,
            Self::InMemory(db) => db.get_review(id).await,
        }
    }

    pub async fn list_reviews(&self, event_id: &str) -> Result<Vec<ReviewRow>> {
        match self {
            Self::Postgres(db) => db.list_reviews(event_id).await,
            Self::InMemory(db) => db.list_reviews(event_id).await,
        }
    }

    pub async fn delete_review(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_review(id, user_id).await,
            Self::InMemory(db) => db.delete_review(id, user_id).await,
        }
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn create_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<NotificationRow> {
        match self {
            Self::Postgres(db) => db.create_notification(input).await,
            Self::InMemory(db) => db.create_notification(input).await,
        }
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => db.get_notification(id).await,
            Self::InMemory(db) => db.get_notification(id).await,
        }
    }

    pub async fn list_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationWithEventRow>> {
        match self {
            Self::Postgres(db) => db.list_notifications(user_id).await,
            Self::InMemory(db) => db.list_notifications(user_id).await,
        }
    }

    pub async fn update_notification_date(
        &self,
        id: Uuid,
        user_id: Uuid,
        notification_date: DateTime<Utc>,
    ) -> Result<Option<NotificationRow>> {
        match self {
            Self::Postgres(db) => {
                db.update_notification_date(id, user_id, notification_date)
                    .await
            }
            Self::InMemory(db) => {
                db.update_notification_date(id, user_id, notification_date)
                    .await
            }
        }
    }

    pub async fn delete_notification(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_notification(id, user_id).await,
            Self::InMemory(db) => db.delete_notification(id, user_id).await,
        }
    }

    // ============================================
    // Notification history
    // ============================================

    pub async fn list_notification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationHistoryRow>> {
        match self {
            Self::Postgres(db) => db.list_notification_history(user_id).await,
            Self::InMemory(db) => db.list_notification_history(user_id).await,
        }
    }
}
