// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use encore_core::NewEvent;
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: String,
    pub venue_address: Option<String>,
    pub venue_lat: Option<f64>,
    pub venue_lng: Option<f64>,
    pub genre: String,
    pub image_url: Option<String>,
    pub price_range: Option<String>,
    pub ticket_url: Option<String>,
    pub ticket_open_time: Option<DateTime<Utc>>,
    pub age_limit: Option<String>,
    pub artist_profile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub venue: String,
    pub venue_address: Option<String>,
    pub venue_lat: Option<f64>,
    pub venue_lng: Option<f64>,
    pub genre: String,
    pub image_url: Option<String>,
    pub price_range: Option<String>,
    pub ticket_url: Option<String>,
    pub ticket_open_time: Option<DateTime<Utc>>,
    pub age_limit: Option<String>,
    pub artist_profile: Option<String>,
}

impl From<NewEvent> for CreateEventRow {
    fn from(event: NewEvent) -> Self {
        Self {
            title: event.title,
            artist: event.artist,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            venue: event.venue,
            venue_address: event.venue_address,
            venue_lat: event.venue_lat,
            venue_lng: event.venue_lng,
            genre: event.genre,
            image_url: event.image_url,
            price_range: event.price_range,
            ticket_url: event.ticket_url,
            ticket_open_time: event.ticket_open_time,
            age_limit: event.age_limit,
            artist_profile: event.artist_profile,
        }
    }
}

// ============================================
// Reviews
//
// event_id is text: events from the ingestion API keep their upstream ids.
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub event_id: String,
    pub user_id: Uuid,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateReviewRow {
    pub event_id: String,
    pub user_id: Uuid,
    pub rating: i32,
    pub content: String,
}

// ============================================
// Notifications
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub notification_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Notification joined with the event it refers to
///
/// The event columns are NULL when the event no longer exists.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationWithEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub notification_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event_title: Option<String>,
    pub event_venue: Option<String>,
    pub event_start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRow {
    pub user_id: Uuid,
    pub event_id: String,
    pub kind: String,
    pub notification_date: DateTime<Utc>,
}

// ============================================
// Notification history (written by the delivery process)
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct NotificationHistoryRow {
    pub id: Uuid,
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationHistoryRow {
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub status: String,
}
