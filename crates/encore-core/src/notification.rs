// Notification domain types
//
// A notification is a user's subscription to be alerted before ticket sale
// or event start. Delivery happens outside this service; history records are
// written by the delivery process and only read here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// What the subscription alerts about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Ticket sale opens
    #[serde(alias = "ticketing")]
    Ticket,
    /// Event starts
    #[serde(alias = "start")]
    Event,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Ticket => write!(f, "ticket"),
            NotificationKind::Event => write!(f, "event"),
        }
    }
}

impl NotificationKind {
    /// Strict parse of a stored value, including legacy spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ticket" | "ticketing" => Some(NotificationKind::Ticket),
            "event" | "start" => Some(NotificationKind::Event),
            _ => None,
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(value = %s, "Unknown notification type, treating as event");
            NotificationKind::Event
        })
    }
}

/// A user's subscription to one event alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Target delivery time
    pub notification_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event fields shown next to a subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationEventSummary {
    pub title: String,
    pub venue: String,
    pub start_date: String,
}

/// Subscription joined with its event, as listed on the notifications page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationEntry {
    #[serde(flatten)]
    pub notification: Notification,
    /// None when the event no longer exists
    pub event: Option<NotificationEventSummary>,
}

/// Fixed "remind me earlier" offsets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum ShiftOffset {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl ShiftOffset {
    pub fn hours(&self) -> i64 {
        match self {
            ShiftOffset::OneHour => 1,
            ShiftOffset::OneDay => 24,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::hours(self.hours())
    }

    /// Target time moved earlier by this offset
    pub fn apply(&self, target: DateTime<Utc>) -> DateTime<Utc> {
        target - self.duration()
    }
}

/// Subscription request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NewNotification {
    pub event_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub notification_date: DateTime<Utc>,
}

/// Outcome of a delivery attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(DeliveryStatus::Sent),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }
}

impl From<&str> for DeliveryStatus {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(value = %s, "Unknown delivery status, treating as failed");
            DeliveryStatus::Failed
        })
    }
}

/// Record of a past delivery attempt, written by the delivery process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationHistory {
    pub id: Uuid,
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub sent_at: DateTime<Utc>,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// History record joined with the originating event's title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationHistoryEntry {
    #[serde(flatten)]
    pub history: NotificationHistory,
    pub event_title: Option<String>,
}
