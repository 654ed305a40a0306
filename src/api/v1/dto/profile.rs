/*
 * Responsibility
 * - Profile (current user) response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub user_name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
