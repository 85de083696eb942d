// Database-backed EventSource implementation

use async_trait::async_trait;
use encore_core::{format_timestamp, EncoreError, Event, EventSource, Result};
use uuid::Uuid;

use crate::backend::StorageBackend;
use crate::models::EventRow;

/// Convert a stored row into the domain event
pub fn event_from_row(row: EventRow) -> Event {
    Event {
        id: row.id.to_string(),
        title: row.title,
        artist: row.artist,
        description: row.description,
        start_date: format_timestamp(row.start_date),
        end_date: format_timestamp(row.end_date),
        venue: row.venue,
        venue_address: row.venue_address,
        venue_lat: row.venue_lat,
        venue_lng: row.venue_lng,
        genre: row.genre,
        image_url: row.image_url,
        price_range: row.price_range,
        ticket_url: row.ticket_url,
        ticket_open_time: row.ticket_open_time.map(format_timestamp),
        age_limit: row.age_limit,
        artist_profile: row.artist_profile,
        created_at: format_timestamp(row.created_at),
        updated_at: format_timestamp(row.updated_at),
    }
}

// ============================================================================
// DbEventSource - Reads events from the backend store
// ============================================================================

/// Event source backed by the `events` table
#[derive(Clone)]
pub struct DbEventSource {
    db: StorageBackend,
}

impl DbEventSource {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventSource for DbEventSource {
    async fn fetch_events(&self) -> Result<Vec<Event>> {
        let rows = self
            .db
            .list_events()
            .await
            .map_err(EncoreError::store)?;

        Ok(rows.into_iter().map(event_from_row).collect())
    }

    async fn fetch_event_by_id(&self, id: &str) -> Result<Option<Event>> {
        // Ids are UUIDs in the store; anything else cannot match a row
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = self
            .db
            .get_event(id)
            .await
            .map_err(EncoreError::store)?;

        Ok(row.map(event_from_row))
    }

    fn kind(&self) -> &'static str {
        "database"
    }
}
