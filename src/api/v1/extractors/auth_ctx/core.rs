use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Extractor handing `AuthCtx` to handlers.
///
/// The gate middleware must already have inserted the context into the
/// request extensions. A missing extension means a protected handler was
/// mounted outside the gate: a wiring bug, surfaced as an internal error
/// instead of a misleading 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Internal)
    }
}
