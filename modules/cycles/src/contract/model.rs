use chrono::NaiveDate;
use serde_json::Value as Json;

/// A single dated occurrence logged against a user. Immutable once stored.
///
/// `user_id` carries the owner's *external* subject id, not a row reference:
/// events stay attributable even when no local user row exists yet.
/// Referential integrity to `users` is an application-layer concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEvent {
    pub id: i32,
    pub user_id: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub meta: Option<Json>,
}

/// Data for appending a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycleEvent {
    pub user_id: String,
    pub event_type: String,
    pub date: NaiveDate,
    pub meta: Option<Json>,
}
