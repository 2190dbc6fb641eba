use std::sync::Arc;

use api_problem::{Problem, ProblemResponse};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use tracing::debug;

use crate::error::AuthError;
use crate::verifier::{SubjectIdentity, TokenVerifier};

/// Request guard: extracts and verifies the bearer token, yielding the
/// caller's [`SubjectIdentity`]. Handlers that take this parameter are
/// protected; everything else is public.
///
/// The process-wide verifier must be injected as
/// `Extension(Arc<dyn TokenVerifier>)` on the router.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SubjectIdentity);

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn problem(
    status: StatusCode,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_instance(instance)
        .into()
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let instance = parts.uri.path().to_owned();

        let verifier = parts
            .extensions
            .get::<Arc<dyn TokenVerifier>>()
            .cloned()
            .ok_or_else(|| {
                problem(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Token verifier is not configured",
                    &instance,
                )
            })?;

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let token = bearer_token(header).ok_or_else(|| {
            problem(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                AuthError::MissingBearer.to_string(),
                &instance,
            )
        })?;

        match verifier.verify(token).await {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(e) => {
                // The reason stays in the log; the client sees one fixed 401.
                debug!(error = %e, "bearer token verification failed");
                Err(problem(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                    AuthError::Unauthenticated.to_string(),
                    &instance,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_from_well_formed_header() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(bearer_token(None), None);
        assert_eq!(bearer_token(Some("")), None);
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        // Scheme is case-sensitive, as in the original backend.
        assert_eq!(bearer_token(Some("bearer abc")), None);
    }
}
