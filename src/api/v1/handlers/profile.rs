/*
 * Responsibility
 * - GET /me: echo the authenticated identity back to the caller
 * - Reads the caller from AuthCtx only; the token never reaches this layer
 */
use axum::Json;

use crate::api::v1::dto::profile::ProfileResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        id: ctx.user_id,
        user_name: ctx.user_name,
        image_url: ctx.image_url,
        created_at: ctx.created_at,
    })
}
