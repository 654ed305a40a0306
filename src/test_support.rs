//! Fixtures shared by the in-module test suites: canned identity stores,
//! token signing helpers, and request builders.

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::http::{Request, header};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use std::collections::HashMap;

use crate::services::auth::identity::{Identity, IdentityStore, IdentityStoreError};

pub const TEST_SECRET: &str = "s3cr3t";

pub fn identity(id: &str) -> Identity {
    Identity {
        id: id.to_string(),
        user_name: "Jana".to_string(),
        image_url: None,
        created_at: Utc::now(),
    }
}

/// Store backed by a fixed in-memory set of identities.
#[derive(Default)]
pub struct StaticStore {
    identities: HashMap<String, Identity>,
}

impl StaticStore {
    pub fn with(identities: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            identities: identities
                .into_iter()
                .map(|identity| (identity.id.clone(), identity))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityStore for StaticStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, IdentityStoreError> {
        Ok(self.identities.get(id).cloned())
    }
}

/// Store whose backend is down: every lookup fails at the transport.
pub struct UnreachableStore;

#[async_trait]
impl IdentityStore for UnreachableStore {
    async fn find_by_id(&self, _id: &str) -> Result<Option<Identity>, IdentityStoreError> {
        Err(IdentityStoreError::Connection(
            "connection refused".to_string(),
        ))
    }
}

pub fn sign_token(secret: &str, sub: &str, expires_in_secs: i64) -> String {
    sign_token_with_algorithm(Algorithm::HS256, secret, sub, expires_in_secs)
}

/// Sign a token the way a real issuer would: `sub`, `exp`, and an `iat` the
/// gate is expected to tolerate without reading.
pub fn sign_token_with_algorithm(
    algorithm: Algorithm,
    secret: &str,
    sub: &str,
    expires_in_secs: i64,
) -> String {
    let now = Utc::now().timestamp();
    let claims = serde_json::json!({
        "sub": sub,
        "exp": now + expires_in_secs,
        "iat": now,
    });
    jsonwebtoken::encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Hand-assembled `alg: none` token with an empty signature segment.
pub fn forge_unsigned_token(sub: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({
            "sub": sub,
            "exp": Utc::now().timestamp() + 3600,
        })
        .to_string(),
    );
    format!("{header}.{payload}.")
}

pub fn request_parts(authorization: Option<&str>) -> Parts {
    request_parts_for_uri("/api/v1/me", authorization)
}

pub fn request_parts_for_uri(uri: &str, authorization: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let (parts, ()) = builder.body(()).unwrap().into_parts();
    parts
}
