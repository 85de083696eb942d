// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// Mirrors the Database API, including the joins and ordering of its queries,
// so the API runs and is tested without PostgreSQL.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    events: RwLock<HashMap<Uuid, EventRow>>,
    reviews: RwLock<HashMap<Uuid, ReviewRow>>,
    notifications: RwLock<HashMap<Uuid, NotificationRow>>,
    history: RwLock<HashMap<Uuid, NotificationHistoryRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Event a text reference points at, if it names a stored event
    fn referenced_event<'a>(
        events: &'a HashMap<Uuid, EventRow>,
        event_id: &str,
    ) -> Option<&'a EventRow> {
        Uuid::parse_str(event_id)
            .ok()
            .and_then(|id| events.get(&id))
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            title: input.title,
            artist: input.artist,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            venue: input.venue,
            venue_address: input.venue_address,
            venue_lat: input.venue_lat,
            venue_lng: input.venue_lng,
            genre: input.genre,
            image_url: input.image_url,
            price_range: input.price_range,
            ticket_url: input.ticket_url,
            ticket_open_time: input.ticket_open_time,
            age_limit: input.age_limit,
            artist_profile: input.artist_profile,
            created_at: now,
            updated_at: now,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let mut result: Vec<_> = self.events.read().values().cloned().collect();
        result.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(result)
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = ReviewRow {
            id,
            event_id: input.event_id,
            user_id: input.user_id,
            rating: input.rating,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        self.reviews.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        Ok(self.reviews.read().get(&id).cloned())
    }

    pub async fn list_reviews(&self, event_id: &str) -> Result<Vec<ReviewRow>> {
        let reviews = self.reviews.read();
        let mut result: Vec<_> = reviews
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        // v7 ids break ties between reviews created in the same instant
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn delete_review(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut reviews = self.reviews.write();
        if let Some(review) = reviews.get(&id) {
            if review.user_id == user_id {
                reviews.remove(&id);
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn create_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<NotificationRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = NotificationRow {
            id,
            user_id: input.user_id,
            event_id: input.event_id,
            kind: input.kind,
            notification_date: input.notification_date,
            created_at: now,
            updated_at: now,
        };
        self.notifications.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        Ok(self.notifications.read().get(&id).cloned())
    }

    pub async fn list_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationWithEventRow>> {
        let notifications = self.notifications.read();
        let events = self.events.read();
        let mut result: Vec<_> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .map(|n| {
                let event = Self::referenced_event(&events, &n.event_id);
                NotificationWithEventRow {
                    id: n.id,
                    user_id: n.user_id,
                    event_id: n.event_id.clone(),
                    kind: n.kind.clone(),
                    notification_date: n.notification_date,
                    created_at: n.created_at,
                    updated_at: n.updated_at,
                    event_title: event.map(|e| e.title.clone()),
                    event_venue: event.map(|e| e.venue.clone()),
                    event_start_date: event.map(|e| e.start_date),
                }
            })
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    pub async fn update_notification_date(
        &self,
        id: Uuid,
        user_id: Uuid,
        notification_date: DateTime<Utc>,
    ) -> Result<Option<NotificationRow>> {
        let mut notifications = self.notifications.write();
        match notifications.get_mut(&id) {
            Some(notification) if notification.user_id == user_id => {
                notification.notification_date = notification_date;
                notification.updated_at = Self::now();
                Ok(Some(notification.clone()))
            }
            _ => Ok(None),
        }
    }

    pub async fn delete_notification(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut notifications = self.notifications.write();
        if let Some(notification) = notifications.get(&id) {
            if notification.user_id == user_id {
                notifications.remove(&id);
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ============================================
    // Notification history
    // ============================================

    /// Record a delivery attempt, standing in for the external delivery process
    pub async fn create_notification_history(
        &self,
        input: CreateNotificationHistoryRow,
    ) -> Result<NotificationHistoryRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = NotificationHistoryRow {
            id,
            notification_id: input.notification_id,
            user_id: input.user_id,
            sent_at: input.sent_at,
            status: input.status,
            created_at: now,
            updated_at: now,
            event_title: None,
        };
        self.history.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn list_notification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationHistoryRow>> {
        let history = self.history.read();
        let notifications = self.notifications.read();
        let events = self.events.read();
        let mut result: Vec<_> = history
            .values()
            .filter(|h| h.user_id == user_id)
            .map(|h| {
                let event_title = notifications
                    .get(&h.notification_id)
                    .and_then(|n| Self::referenced_event(&events, &n.event_id))
                    .map(|e| e.title.clone());
                NotificationHistoryRow {
                    event_title,
                    ..h.clone()
                }
            })
            .collect();
        result.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event_input(title: &str, start: DateTime<Utc>) -> CreateEventRow {
        CreateEventRow {
            title: title.to_string(),
            artist: "Artist".to_string(),
            description: "Description".to_string(),
            start_date: start,
            end_date: start + Duration::hours(2),
            venue: "Hall".to_string(),
            venue_address: None,
            venue_lat: None,
            venue_lng: None,
            genre: "rock".to_string(),
            image_url: None,
            price_range: None,
            ticket_url: None,
            ticket_open_time: None,
            age_limit: None,
            artist_profile: None,
        }
    }

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 19, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_events_listed_by_start() {
        let db = InMemoryDatabase::new();
        db.create_event(event_input("June", at(6, 1))).await.unwrap();
        let may = db.create_event(event_input("May", at(5, 1))).await.unwrap();

        let events = db.list_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, may.id);
        assert!(db.get_event(may.id).await.unwrap().is_some());
        assert!(db.get_event(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_review_delete_requires_owner() {
        let db = InMemoryDatabase::new();
        let event = db.create_event(event_input("Show", at(5, 1))).await.unwrap();
        let owner = Uuid::now_v7();
        let review = db
            .create_review(CreateReviewRow {
                event_id: event.id.to_string(),
                user_id: owner,
                rating: 4,
                content: "good".to_string(),
            })
            .await
            .unwrap();

        assert!(!db.delete_review(review.id, Uuid::now_v7()).await.unwrap());
        assert_eq!(db.list_reviews(&event.id.to_string()).await.unwrap().len(), 1);
        assert!(db.delete_review(review.id, owner).await.unwrap());
        assert!(db.list_reviews(&event.id.to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reviews_newest_first() {
        let db = InMemoryDatabase::new();
        let event = db.create_event(event_input("Show", at(5, 1))).await.unwrap();
        let user = Uuid::now_v7();
        for rating in 1..=3 {
            db.create_review(CreateReviewRow {
                event_id: event.id.to_string(),
                user_id: user,
                rating,
                content: format!("review {}", rating),
            })
            .await
            .unwrap();
        }

        let ratings: Vec<i32> = db
            .list_reviews(&event.id.to_string())
            .await
            .unwrap()
            .iter()
            .map(|r| r.rating)
            .collect();
        assert_eq!(ratings, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_upstream_event_ids_are_kept_as_text() {
        let db = InMemoryDatabase::new();
        let user = Uuid::now_v7();
        db.create_review(CreateReviewRow {
            event_id: "42".to_string(),
            user_id: user,
            rating: 5,
            content: "great".to_string(),
        })
        .await
        .unwrap();
        db.create_notification(CreateNotificationRow {
            user_id: user,
            event_id: "42".to_string(),
            kind: "ticket".to_string(),
            notification_date: at(5, 1),
        })
        .await
        .unwrap();

        assert_eq!(db.list_reviews("42").await.unwrap().len(), 1);
        assert!(db.list_reviews("43").await.unwrap().is_empty());

        let listed = db.list_notifications(user).await.unwrap();
        assert_eq!(listed[0].event_id, "42");
        assert_eq!(listed[0].event_title, None);
    }

    #[tokio::test]
    async fn test_notifications_join_event_and_scope_to_owner() {
        let db = InMemoryDatabase::new();
        let event = db.create_event(event_input("Show", at(5, 1))).await.unwrap();
        let owner = Uuid::now_v7();
        let other = Uuid::now_v7();
        let notification = db
            .create_notification(CreateNotificationRow {
                user_id: owner,
                event_id: event.id.to_string(),
                kind: "event".to_string(),
                notification_date: at(5, 1),
            })
            .await
            .unwrap();

        let listed = db.list_notifications(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event_title.as_deref(), Some("Show"));
        assert_eq!(listed[0].event_start_date, Some(at(5, 1)));
        assert!(db.list_notifications(other).await.unwrap().is_empty());

        let earlier = at(4, 30);
        assert!(db
            .update_notification_date(notification.id, other, earlier)
            .await
            .unwrap()
            .is_none());
        let updated = db
            .update_notification_date(notification.id, owner, earlier)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.notification_date, earlier);

        assert!(!db.delete_notification(notification.id, other).await.unwrap());
        assert!(db.delete_notification(notification.id, owner).await.unwrap());
        assert!(db.get_notification(notification.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_most_recent_first_with_title() {
        let db = InMemoryDatabase::new();
        let event = db.create_event(event_input("Show", at(5, 1))).await.unwrap();
        let user = Uuid::now_v7();
        let notification = db
            .create_notification(CreateNotificationRow {
                user_id: user,
                event_id: event.id.to_string(),
                kind: "ticket".to_string(),
                notification_date: at(4, 1),
            })
            .await
            .unwrap();

        for (day, status) in [(1, "sent"), (2, "failed")] {
            db.create_notification_history(CreateNotificationHistoryRow {
                notification_id: notification.id,
                user_id: user,
                sent_at: at(4, day),
                status: status.to_string(),
            })
            .await
            .unwrap();
        }

        let history = db.list_notification_history(user).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, "failed");
        assert_eq!(history[0].event_title.as_deref(), Some("Show"));
    }
}
