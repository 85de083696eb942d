// Admin intake service

use encore_core::{EncoreError, Event, EventIntakeForm, Result};
use encore_storage::{event_from_row, StorageBackend};

pub struct IntakeService {
    db: StorageBackend,
}

impl IntakeService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    /// Normalize the form and insert it as one event
    pub async fn submit(&self, form: EventIntakeForm) -> Result<Event> {
        let new_event = form.into_new_event()?;

        let row = self
            .db
            .create_event(new_event.into())
            .await
            .map_err(EncoreError::store)?;

        tracing::info!(event_id = %row.id, title = %row.title, "Event registered");
        Ok(event_from_row(row))
    }
}
