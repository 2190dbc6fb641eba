use api_problem::{Problem, ProblemResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::domain::error::DomainError;

fn from_parts(
    status: StatusCode,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_instance(instance)
        .into()
}

/// Map a domain error to its fixed wire status. Database details are logged,
/// never echoed.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "Not Found",
            "User not found in database",
            instance,
        ),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            format!("Email '{}' is already registered", email),
            instance,
        ),
        DomainError::MissingSubject => from_parts(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            "Token does not contain a subject id",
            instance,
        ),
        DomainError::Validation { message } => from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Unprocessable Entity",
            message.clone(),
            instance,
        ),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// A body that failed schema validation gets a problem document instead of
/// axum's plain-text rejection.
pub fn map_json_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Unprocessable Entity",
        rejection.body_text(),
        instance,
    )
}
