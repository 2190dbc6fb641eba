use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, http::Uri, response::Json, Extension};
use tracing::{debug, error};

use api_problem::ProblemResponse;
use firebase_auth::AuthUser;

use crate::api::rest::dto::{
    AppendResponse, CreateEventReq, EventDto, PredictReq, PredictResponse,
};
use crate::api::rest::error::{map_domain_error, map_json_rejection};
use crate::domain::service::Service;

/// Log one event for the verified caller.
pub async fn append_event(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<CreateEventReq>, JsonRejection>,
) -> Result<Json<AppendResponse>, ProblemResponse> {
    let Json(req) = payload.map_err(|r| map_json_rejection(&r, uri.path()))?;

    match svc
        .append(&identity.uid, req.event_type, req.date, req.meta)
        .await
    {
        Ok(event) => Ok(Json(AppendResponse {
            status: "ok".to_string(),
            event_id: event.id,
        })),
        Err(e) => {
            error!("Failed to append event: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// The caller's own event history, newest date first.
pub async fn history(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(identity): AuthUser,
    uri: Uri,
) -> Result<Json<Vec<EventDto>>, ProblemResponse> {
    match svc.history(&identity.uid).await {
        Ok(events) => Ok(Json(events.into_iter().map(EventDto::from).collect())),
        Err(e) => {
            error!("Failed to fetch history: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Placeholder until the real predictor ships: fixed dates, fixed confidence.
pub async fn predict(
    uri: Uri,
    AuthUser(identity): AuthUser,
    payload: Result<Json<PredictReq>, JsonRejection>,
) -> Result<Json<PredictResponse>, ProblemResponse> {
    let Json(req) = payload.map_err(|r| map_json_rejection(&r, uri.path()))?;
    debug!(uid = %identity.uid, model = %req.model, "Prediction requested");

    Ok(Json(PredictResponse {
        next_period_start: "2025-11-18".to_string(),
        confidence_days: 3,
        fertile_window: vec!["2025-11-03".to_string(), "2025-11-04".to_string()],
    }))
}
