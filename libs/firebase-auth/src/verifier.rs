use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Google's JWKS endpoint for Firebase secure-token signing keys.
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// The verified identity asserted by the identity provider for a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectIdentity {
    /// Stable unique subject id (`sub` claim, the Firebase UID).
    pub uid: String,
    /// Verified email, when the provider includes it.
    pub email: Option<String>,
}

/// Port for the request guard: anything that can turn a bearer token into a
/// subject identity. Production uses [`FirebaseVerifier`]; tests substitute a
/// static implementation.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<SubjectIdentity, AuthError>;
}

/// Claims we read out of a verified ID token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Outcome of a single decode attempt against a given key set.
enum Attempt {
    Ok(SubjectIdentity),
    /// The token names a `kid` the cached set does not have.
    UnknownKid,
    Rejected,
}

/// Verifies Firebase ID tokens against Google's published signing keys.
///
/// Trust material is loaded exactly once per process via [`connect`] and then
/// shared read-only; the only mutation is an occasional whole-set swap when an
/// unknown `kid` forces a refresh, serialized behind a mutex.
///
/// [`connect`]: FirebaseVerifier::connect
pub struct FirebaseVerifier {
    project_id: String,
    issuer: String,
    jwks_url: String,
    http: reqwest::Client,
    keys: ArcSwap<JwkSet>,
    refresh: Mutex<()>,
}

impl FirebaseVerifier {
    /// Build a verifier for `project_id`, fetching the initial key set.
    /// Fails (and should abort startup) if the keys cannot be fetched.
    pub async fn connect(
        project_id: impl Into<String>,
        jwks_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let project_id = project_id.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        let jwks_url = jwks_url.unwrap_or_else(|| GOOGLE_JWKS_URL.to_string());

        let keys = fetch_keys(&http, &jwks_url).await?;
        info!(key_count = keys.keys.len(), "loaded identity-provider JWKS");

        Ok(Self {
            issuer: format!("https://securetoken.google.com/{project_id}"),
            project_id,
            jwks_url,
            http,
            keys: ArcSwap::from_pointee(keys),
            refresh: Mutex::new(()),
        })
    }

    fn decode_with(&self, token: &str, keys: &JwkSet) -> Attempt {
        let header = match decode_header(token) {
            Ok(h) => h,
            Err(_) => return Attempt::Rejected,
        };
        let Some(kid) = header.kid else {
            return Attempt::Rejected;
        };
        let Some(jwk) = keys.find(&kid) else {
            return Attempt::UnknownKid;
        };
        let key = match DecodingKey::from_jwk(jwk) {
            Ok(k) => k,
            Err(_) => return Attempt::Rejected,
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[&self.issuer]);

        match decode::<Claims>(token, &key, &validation) {
            Ok(data) => Attempt::Ok(SubjectIdentity {
                uid: data.claims.sub,
                email: data.claims.email,
            }),
            Err(e) => {
                debug!(error = %e, "ID token rejected");
                Attempt::Rejected
            }
        }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<SubjectIdentity, AuthError> {
        match self.decode_with(token, &self.keys.load()) {
            Attempt::Ok(identity) => Ok(identity),
            Attempt::Rejected => Err(AuthError::Unauthenticated),
            Attempt::UnknownKid => {
                // One refresh per unknown kid; concurrent requests queue here
                // and re-check the cache before hitting the network again.
                let _guard = self.refresh.lock().await;
                if let Attempt::Ok(identity) = self.decode_with(token, &self.keys.load()) {
                    return Ok(identity);
                }

                let fresh = fetch_keys(&self.http, &self.jwks_url).await.map_err(|e| {
                    warn!(error = %e, "JWKS refresh failed");
                    AuthError::Unauthenticated
                })?;
                self.keys.store(Arc::new(fresh));

                match self.decode_with(token, &self.keys.load()) {
                    Attempt::Ok(identity) => Ok(identity),
                    _ => Err(AuthError::Unauthenticated),
                }
            }
        }
    }
}

async fn fetch_keys(http: &reqwest::Client, url: &str) -> Result<JwkSet, AuthError> {
    let resp = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuthError::KeyFetch(e.to_string()))?;
    resp.json::<JwkSet>()
        .await
        .map_err(|e| AuthError::KeyFetch(e.to_string()))
}
