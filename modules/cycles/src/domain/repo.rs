use crate::contract::model::{CycleEvent, NewCycleEvent};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the event log needs.
#[async_trait]
pub trait CycleEventsRepository: Send + Sync {
    /// Append one event and return it with the generated id.
    async fn insert(&self, e: NewCycleEvent) -> anyhow::Result<CycleEvent>;
    /// All events for one subject, newest date first; same-date events come
    /// back in insertion order (ascending id).
    async fn list_for_user(&self, uid: &str) -> anyhow::Result<Vec<CycleEvent>>;
}
