/*
 * Responsibility
 * - The "authenticated caller" type handlers get to see
 * - The gate middleware resolves it and stores it in request extensions;
 *   handlers receive only this type and never re-derive the caller from
 *   the token
 *
 * Notes
 * - Token verification and identity lookup are middleware/services
 *   responsibilities, not this type's
 */

use chrono::{DateTime, Utc};

use crate::services::auth::identity::Identity;

/// Context attached to a request once the gate has accepted it.
///
/// - `user_id` equals the token's subject claim (opaque string)
/// - the remaining fields are the identity record as the store answered at
///   verification time, a snapshot scoped to this one request
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: String,
    pub user_name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        Self {
            user_id: identity.id,
            user_name: identity.user_name,
            image_url: identity.image_url,
            created_at: identity.created_at,
        }
    }
}
