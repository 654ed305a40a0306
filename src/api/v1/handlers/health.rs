/*
 * Responsibility
 * - GET /health (疎通用)
 * - Routed at the root in app.rs, outside the bearer gate on purpose
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
