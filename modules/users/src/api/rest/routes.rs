use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// User Directory routes. The caller nests this under the versioned prefix
/// and provides the token verifier extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/users/ping", get(handlers::ping))
        .route("/users/me", get(handlers::me))
        .route("/users/register", post(handlers::register))
        .route("/user/create-or-sync", post(handlers::create_or_sync))
        .layer(Extension(service))
}
