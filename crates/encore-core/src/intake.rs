// Admin intake form normalization
//
// The form is flat text, one field per Event column. Empty optional fields
// become absent, coordinates are parsed from text and timestamps accept the
// browser's datetime-local format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EncoreError, Result};
use crate::event::{parse_timestamp, NewEvent};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Raw intake form state, as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(default)]
pub struct EventIntakeForm {
    pub title: String,
    pub artist: String,
    pub description: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-01T19:00"))]
    pub start_date: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-06-01T22:00"))]
    pub end_date: String,
    pub venue: String,
    pub venue_address: String,
    #[cfg_attr(feature = "openapi", schema(example = "37.5207"))]
    pub venue_lat: String,
    #[cfg_attr(feature = "openapi", schema(example = "127.1256"))]
    pub venue_lng: String,
    pub genre: String,
    pub image_url: String,
    pub price_range: String,
    pub ticket_url: String,
    pub ticket_open_time: String,
    pub age_limit: String,
    pub artist_profile: String,
}

impl EventIntakeForm {
    /// Normalize the form into an insertable event
    pub fn into_new_event(self) -> Result<NewEvent> {
        let title = required("title", self.title)?;
        let artist = required("artist", self.artist)?;
        let description = required("description", self.description)?;
        let venue = required("venue", self.venue)?;
        let genre = required("genre", self.genre)?;
        let start_date = required_timestamp("start_date", &self.start_date)?;
        let end_date = required_timestamp("end_date", &self.end_date)?;

        if start_date > end_date {
            return Err(EncoreError::validation(
                "start_date must not be after end_date",
            ));
        }

        Ok(NewEvent {
            title,
            artist,
            description,
            start_date,
            end_date,
            venue,
            venue_address: optional(self.venue_address),
            venue_lat: coordinate("venue_lat", &self.venue_lat)?,
            venue_lng: coordinate("venue_lng", &self.venue_lng)?,
            genre,
            image_url: optional(self.image_url),
            price_range: optional(self.price_range),
            ticket_url: optional(self.ticket_url),
            ticket_open_time: optional_timestamp("ticket_open_time", &self.ticket_open_time)?,
            age_limit: optional(self.age_limit),
            artist_profile: optional(self.artist_profile),
        })
    }
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(EncoreError::validation(format!("{} is required", field)));
    }
    Ok(value)
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn required_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    if value.trim().is_empty() {
        return Err(EncoreError::validation(format!("{} is required", field)));
    }
    parse_timestamp(value)
        .ok_or_else(|| EncoreError::validation(format!("{} is not a valid date", field)))
}

fn optional_timestamp(field: &str, value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_timestamp(value)
        .map(Some)
        .ok_or_else(|| EncoreError::validation(format!("{} is not a valid date", field)))
}

fn coordinate(field: &str, value: &str) -> Result<Option<f64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| EncoreError::validation(format!("{} is not a number", field)))
}
