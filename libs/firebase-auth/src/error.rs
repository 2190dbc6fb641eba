use thiserror::Error;

/// Verification failures. Everything that happens after the bearer token is
/// extracted maps to `Unauthenticated` on the wire.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header missing or malformed")]
    MissingBearer,

    #[error("Invalid or expired identity token")]
    Unauthenticated,

    /// Trust material could not be fetched. Fatal at startup; during a
    /// request-time refresh it degrades to `Unauthenticated`.
    #[error("JWKS endpoint unavailable: {0}")]
    KeyFetch(String),
}
