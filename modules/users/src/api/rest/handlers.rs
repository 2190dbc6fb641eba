use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::Uri,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use tracing::{error, info};

use api_problem::ProblemResponse;
use firebase_auth::AuthUser;

use crate::api::rest::dto::{
    MeResponse, RegisterResponse, RegisterUserReq, SyncResponse, SyncUserReq, UserSummaryDto,
};
use crate::api::rest::error::{map_domain_error, map_json_rejection};
use crate::domain::service::Service;

/// Liveness probe, no auth.
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// Return the profile row backing the verified caller.
pub async fn me(
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(identity): AuthUser,
    uri: Uri,
) -> Result<Json<MeResponse>, ProblemResponse> {
    match svc.find_by_uid(&identity.uid).await {
        Ok(user) => Ok(Json(MeResponse {
            message: "Authenticated".to_string(),
            user: UserSummaryDto::from(user),
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

/// Store the profile of an account that already exists with the identity
/// provider. Does not create provider accounts, only the local row.
pub async fn register(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<RegisterUserReq>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ProblemResponse> {
    let Json(req) = payload.map_err(|r| map_json_rejection(&r, uri.path()))?;
    info!(correo = %req.correo, "Registering user");

    match svc.register(req.into()).await {
        Ok(user) => Ok(Json(RegisterResponse {
            message: "User registered".to_string(),
            user: UserSummaryDto::from(user),
        })),
        Err(e) => {
            error!("Failed to register user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Upsert the caller's row; the subject id comes from the token, never the body.
pub async fn create_or_sync(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<SyncUserReq>, JsonRejection>,
) -> Result<Json<SyncResponse>, ProblemResponse> {
    let Json(req) = payload.map_err(|r| map_json_rejection(&r, uri.path()))?;

    match svc.sync(&identity.uid, req.into()).await {
        Ok((user, created)) => Ok(Json(SyncResponse {
            status: if created { "created" } else { "updated" }.to_string(),
            user: user.id,
        })),
        Err(e) => {
            error!("Failed to sync user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
