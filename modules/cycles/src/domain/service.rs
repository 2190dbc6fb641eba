use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value as Json;
use tracing::{debug, info, instrument};

use crate::contract::model::{CycleEvent, NewCycleEvent};
use crate::domain::error::DomainError;
use crate::domain::repo::CycleEventsRepository;

/// Domain service for the append-only event log.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn CycleEventsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn CycleEventsRepository>) -> Self {
        Self { repo }
    }

    /// Append an event for the verified caller. The type tag is an open
    /// string and `meta` is stored opaquely, never validated.
    #[instrument(name = "cycles.service.append", skip(self, meta), fields(event_type = %event_type))]
    pub async fn append(
        &self,
        uid: &str,
        event_type: String,
        date: NaiveDate,
        meta: Option<Json>,
    ) -> Result<CycleEvent, DomainError> {
        if event_type.trim().is_empty() {
            return Err(DomainError::validation("type cannot be empty"));
        }

        let event = self
            .repo
            .insert(NewCycleEvent {
                user_id: uid.to_string(),
                event_type,
                date,
                meta,
            })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Appended event id={}", event.id);
        Ok(event)
    }

    /// The caller's own history, newest date first. Cross-user reads are not
    /// expressible through this interface.
    #[instrument(name = "cycles.service.history", skip(self))]
    pub async fn history(&self, uid: &str) -> Result<Vec<CycleEvent>, DomainError> {
        let events = self
            .repo
            .list_for_user(uid)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!("Fetched {} events", events.len());
        Ok(events)
    }
}
