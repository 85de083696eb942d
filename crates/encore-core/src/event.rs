// Event domain types
//
// Events are carried with their timestamps as ISO-8601 text: the HTTP
// ingestion source is untrusted and a malformed timestamp degrades to ""
// instead of failing the fetch. `parse_timestamp` turns the text back into a
// point in time where one is needed (ordering, intake).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A performance occurrence with schedule, venue and ticketing metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_lng: Option<f64>,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_profile: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Event {
    /// Parsed start time, if the text is a recognizable timestamp
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start_date)
    }
}

/// Validated event payload for insertion into the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
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

/// Parse a timestamp as sent by browsers and upstream APIs.
///
/// Accepts RFC 3339, `datetime-local` values (`YYYY-MM-DDTHH:MM[:SS]`, read
/// as UTC), Postgres-style `YYYY-MM-DD HH:MM:SS` and bare dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a stored timestamp the way events carry it on the wire
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Sort events by ascending start time.
///
/// The sort is stable; events whose start time cannot be parsed keep their
/// relative order and go last.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| compare_start(a.starts_at(), b.starts_at()));
}

fn compare_start(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
