//! Firebase ID-token verification.
//!
//! ## Flow
//!
//! 1. The frontend signs the user in with Firebase and sends
//!    `Authorization: Bearer <ID token>` on every API call.
//! 2. At startup the server fetches Google's secure-token JWKS once; a fetch
//!    failure is fatal. The keys live in an [`arc_swap::ArcSwap`] and are
//!    refreshed at most once per request when an unknown `kid` shows up
//!    (Google rotates keys).
//! 3. Per request, the [`AuthUser`] extractor validates the RS256 signature,
//!    expiry, issuer and audience locally and yields the stable subject id.
//!
//! Every rejection collapses to a single 401: callers cannot tell an expired
//! token from a malformed one, and internal reasons only reach the log.

pub mod error;
pub mod extractor;
pub mod verifier;

pub use error::AuthError;
pub use extractor::AuthUser;
pub use verifier::{FirebaseVerifier, SubjectIdentity, TokenVerifier, GOOGLE_JWKS_URL};
