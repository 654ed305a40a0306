use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{fmt, sync::Arc, time::Duration};
use thiserror::Error;
use tokio::time::timeout;

use crate::services::auth::extract::TokenExtractor;
use crate::services::auth::identity::{Identity, IdentityStore, IdentityStoreError};

/// Why a request was rejected by the gate.
///
/// Every failure inside `authenticate` is classified into exactly one of
/// these; nothing else escapes. The HTTP layer collapses the first three
/// into one indistinguishable 401 so callers cannot tell a guessed token
/// from a deleted account, and surfaces `LookupUnavailable` separately.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer credentials in request")]
    NoCredentials,

    #[error("token verification failed: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token itself verified; the identity it names is gone (or never
    /// existed). Distinct from `InvalidToken` so logs can tell the two apart.
    #[error("token subject does not resolve to a live identity")]
    UnknownSubject,

    #[error("identity lookup unavailable: {0}")]
    LookupUnavailable(#[from] IdentityStoreError),
}

#[derive(Debug, Error)]
pub enum AuthenticatorBuildError {
    #[error("token secret must not be empty")]
    EmptySecret,
}

/// Claims the gate reads from an access token.
///
/// `exp` is required: `jsonwebtoken` enforces both presence and freshness.
/// `iat` is carried for logging only; other registered claims a token may
/// declare are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Verification settings for one authenticator instance.
///
/// Constructed explicitly and passed into `Authenticator::new`; there is no
/// process-global gate, so tests can run differently configured instances
/// side by side.
pub struct AuthenticatorConfig {
    pub secret: String,
    pub leeway_seconds: u64,
    pub lookup_timeout: Duration,
}

impl fmt::Debug for AuthenticatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthenticatorConfig")
            .field("secret", &"<redacted>")
            .field("leeway_seconds", &self.leeway_seconds)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

/// Stateless bearer-token gate.
///
/// Per request: locate the token (extraction strategy) → verify signature
/// and expiry against the shared secret → resolve the subject through the
/// identity store. Holds only immutable configuration and `Arc`'d
/// collaborators, so one instance is safe under unbounded concurrent use.
/// Repeated calls with the same token and unchanged store state yield the
/// same outcome; nothing is retried or consumed.
#[derive(Clone)]
pub struct Authenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    extractor: Arc<dyn TokenExtractor>,
    store: Arc<dyn IdentityStore>,
    lookup_timeout: Duration,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Authenticator")
            .field("validation", &self.validation)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl Authenticator {
    pub fn new(
        config: AuthenticatorConfig,
        extractor: Arc<dyn TokenExtractor>,
        store: Arc<dyn IdentityStore>,
    ) -> Result<Self, AuthenticatorBuildError> {
        if config.secret.trim().is_empty() {
            return Err(AuthenticatorBuildError::EmptySecret);
        }

        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // A shared secret can only sign the HMAC family. Tokens declaring
        // anything else (asymmetric algorithms, a forged "none") fail
        // verification. `exp` stays in required_spec_claims.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = config.leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
            extractor,
            store,
            lookup_timeout: config.lookup_timeout,
        })
    }

    /// Gate one request: extract → verify → resolve.
    ///
    /// `Ok(identity)` is produced only when the signature verifies against
    /// the configured secret, the token is unexpired, and the subject still
    /// resolves in the store, all checked now rather than at issuance. An
    /// account deleted after token issuance fails here on the next request;
    /// the per-request lookup is the sole revocation mechanism.
    ///
    /// The future is awaited inline by callers (never spawned), so dropping
    /// it cancels an in-flight lookup instead of leaking it.
    pub async fn authenticate(&self, parts: &Parts) -> Result<Identity, AuthError> {
        let token = self
            .extractor
            .extract(parts)
            .ok_or(AuthError::NoCredentials)?;

        let claims = self.verify(token)?;

        tracing::debug!(
            sub = %claims.sub,
            exp = claims.exp,
            iat = ?claims.iat,
            "bearer token verified; resolving subject"
        );

        self.resolve_subject(&claims.sub).await
    }

    // Signature + expiry checks are pure computation; jsonwebtoken does the
    // cryptographic work and claim deserialization in one pass.
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    // One bounded store call. An elapsed deadline is classified exactly like
    // a store failure: the caller only learns "the store could not answer".
    async fn resolve_subject(&self, subject: &str) -> Result<Identity, AuthError> {
        let found = match timeout(self.lookup_timeout, self.store.find_by_id(subject)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AuthError::LookupUnavailable(IdentityStoreError::Timeout(
                    self.lookup_timeout,
                )));
            }
        };

        found.ok_or(AuthError::UnknownSubject)
    }
}
