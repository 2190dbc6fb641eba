use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::contract::model::CycleEvent;

/// Body of `POST /cycle/events`. The date is a plain `YYYY-MM-DD` day.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventReq {
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: NaiveDate,
    pub meta: Option<Json>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendResponse {
    pub status: String,
    pub event_id: i32,
}

/// One history entry, in the stored wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDto {
    pub id: i32,
    pub user_id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: NaiveDate,
    pub meta: Option<Json>,
}

/// Body of `POST /predict/`. The model selector is accepted but the response
/// is a fixed placeholder until a real predictor ships.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictReq {
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub next_period_start: String,
    pub confidence_days: u32,
    pub fertile_window: Vec<String>,
}

impl From<CycleEvent> for EventDto {
    fn from(e: CycleEvent) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            event_type: e.event_type,
            date: e.date,
            meta: e.meta,
        }
    }
}
