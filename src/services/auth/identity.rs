//! Identity lookup interface used by the token authenticator.
//!
//! The user-record store is owned elsewhere; the gate only asks it one
//! question: "does this subject still exist, and who is it". Keeping the
//! trait here (next to the authenticator) pins down the contract while the
//! concrete store lives in `repos`.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// A live account, as the store knew it at lookup time.
///
/// The authenticator holds no copy of identity records; this value is a
/// point-in-time snapshot scoped to one request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub user_name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Store-layer errors (transport/command), independent from any backend.
///
/// `Timeout` is constructed by the authenticator when the lookup deadline
/// elapses; store implementations report only `Connection`/`Query`.
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("identity store connection error: {0}")]
    Connection(String),
    #[error("identity store query error: {0}")]
    Query(String),
    #[error("identity lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Lookup-by-id collaborator.
///
/// Returns:
/// - `Ok(Some(identity))` => subject exists
/// - `Ok(None)`           => subject does not exist (or no longer exists)
/// - `Err(_)`             => the store could not answer (caller decides;
///   the authenticator classifies this as `LookupUnavailable`)
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, IdentityStoreError>;
}
