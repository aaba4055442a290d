// Event service: ingestion and session replay
//
// Each call issues exactly one storage statement. Nothing is retried; a
// storage failure goes straight back to the caller.

use std::sync::Arc;

use insight_core::{Event, EventPayload};
use insight_storage::{EventRow, StorageBackend, StorageError};

use crate::error::ApiError;

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Validate and store one event.
    ///
    /// Validation runs before storage is touched, so a rejected payload never
    /// produces a write.
    pub async fn ingest(&self, payload: EventPayload) -> Result<Event, ApiError> {
        let new_event = payload.validate()?;

        self.db.insert_event(&new_event).await?;

        tracing::debug!(
            session_id = %new_event.session_id,
            page = %new_event.page,
            event_type = %new_event.event_type,
            "Event stored"
        );
        Ok(new_event.into_event())
    }

    /// Every event of a session, oldest first. Unknown sessions yield an
    /// empty list.
    pub async fn session_events(&self, session_id: &str) -> Result<Vec<Event>, StorageError> {
        let rows = self.db.list_session_events(session_id).await?;
        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    fn row_to_event(row: EventRow) -> Event {
        Event {
            session_id: row.session_id,
            event_type: row.event_type,
            page: row.page,
            x: row.x,
            y: row.y,
            timestamp: row.timestamp,
        }
    }
}
