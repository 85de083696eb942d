// Notification service
//
// Subscribing goes through the push capability first: support check, then
// permission, and only then the record is written. Nothing is rolled back or
// retried on failure.

use encore_core::{
    format_timestamp, DeliveryStatus, EncoreError, NewNotification, Notification,
    NotificationEntry, NotificationEventSummary, NotificationHistory, NotificationHistoryEntry,
    NotificationKind, PushCapability, Result, ShiftOffset,
};
use encore_storage::{
    CreateNotificationRow, NotificationHistoryRow, NotificationRow, NotificationWithEventRow,
    StorageBackend,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct NotificationService {
    db: StorageBackend,
    push: Option<Arc<dyn PushCapability>>,
}

impl NotificationService {
    pub fn new(db: StorageBackend, push: Option<Arc<dyn PushCapability>>) -> Self {
        Self { db, push }
    }

    /// Whether a ready push capability is wired in
    pub fn push_enabled(&self) -> bool {
        self.push.is_some()
    }

    /// The viewer's subscriptions with their event, newest first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<NotificationEntry>> {
        let rows = self
            .db
            .list_notifications(user_id)
            .await
            .map_err(EncoreError::store)?;

        Ok(rows.into_iter().map(Self::row_to_entry).collect())
    }

    pub async fn subscribe(&self, user_id: Uuid, req: NewNotification) -> Result<Notification> {
        if req.event_id.trim().is_empty() {
            return Err(EncoreError::validation("event_id is required"));
        }

        let push = self
            .push
            .as_ref()
            .ok_or_else(|| EncoreError::push_unavailable("push notifications are not configured"))?;

        if !push.is_push_supported(user_id).await? {
            tracing::warn!(user_id = %user_id, "Push not supported for user");
            return Err(EncoreError::PushUnsupported);
        }
        if !push.request_permission(user_id).await? {
            tracing::warn!(user_id = %user_id, "Push permission not granted");
            return Err(EncoreError::PermissionDenied);
        }

        let row = self
            .db
            .create_notification(CreateNotificationRow {
                user_id,
                event_id: req.event_id,
                kind: req.kind.to_string(),
                notification_date: req.notification_date,
            })
            .await
            .map_err(EncoreError::store)?;

        tracing::info!(
            notification_id = %row.id,
            event_id = %row.event_id,
            kind = %req.kind,
            "Notification scheduled"
        );
        Ok(Self::row_to_notification(row))
    }

    /// Move the target time earlier by a fixed offset
    pub async fn shift(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
        offset: ShiftOffset,
    ) -> Result<Notification> {
        let current = self.owned(notification_id, user_id).await?;
        let target = offset.apply(current.notification_date);

        let row = self
            .db
            .update_notification_date(notification_id, user_id, target)
            .await
            .map_err(EncoreError::store)?
            .ok_or_else(|| EncoreError::not_found(format!("notification {}", notification_id)))?;

        Ok(Self::row_to_notification(row))
    }

    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> Result<()> {
        self.owned(notification_id, user_id).await?;

        let deleted = self
            .db
            .delete_notification(notification_id, user_id)
            .await
            .map_err(EncoreError::store)?;
        if !deleted {
            return Err(EncoreError::not_found(format!(
                "notification {}",
                notification_id
            )));
        }

        tracing::info!(notification_id = %notification_id, "Notification deleted");
        Ok(())
    }

    /// The viewer's delivery history, most recently sent first
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<NotificationHistoryEntry>> {
        let rows = self
            .db
            .list_notification_history(user_id)
            .await
            .map_err(EncoreError::store)?;

        Ok(rows.into_iter().map(Self::row_to_history).collect())
    }

    async fn owned(&self, notification_id: Uuid, user_id: Uuid) -> Result<NotificationRow> {
        let row = self
            .db
            .get_notification(notification_id)
            .await
            .map_err(EncoreError::store)?
            .ok_or_else(|| EncoreError::not_found(format!("notification {}", notification_id)))?;

        if row.user_id != user_id {
            return Err(EncoreError::forbidden(
                "notification belongs to another user",
            ));
        }
        Ok(row)
    }

    fn row_to_notification(row: NotificationRow) -> Notification {
        Notification {
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            kind: NotificationKind::from(row.kind.as_str()),
            notification_date: row.notification_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn row_to_entry(row: NotificationWithEventRow) -> NotificationEntry {
        let event = match (row.event_title, row.event_venue, row.event_start_date) {
            (Some(title), Some(venue), Some(start)) => Some(NotificationEventSummary {
                title,
                venue,
                start_date: format_timestamp(start),
            }),
            _ => None,
        };

        NotificationEntry {
            notification: Notification {
                id: row.id,
                user_id: row.user_id,
                event_id: row.event_id,
                kind: NotificationKind::from(row.kind.as_str()),
                notification_date: row.notification_date,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            event,
        }
    }

    fn row_to_history(row: NotificationHistoryRow) -> NotificationHistoryEntry {
        NotificationHistoryEntry {
            history: NotificationHistory {
                id: row.id,
                notification_id: row.notification_id,
                user_id: row.user_id,
                sent_at: row.sent_at,
                status: DeliveryStatus::from(row.status.as_str()),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            event_title: row.event_title,
        }
    }
}
