use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Cycle Event Log routes plus the prediction placeholder. The caller nests
/// this under the versioned prefix and provides the token verifier extension.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/cycle/events", post(handlers::append_event))
        .route("/cycle/history", get(handlers::history))
        // Trailing slash kept for wire compatibility with the mobile client.
        .route("/predict/", post(handlers::predict))
        .layer(Extension(service))
}
