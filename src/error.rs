/*
 * Responsibility
 * - Application-wide `AppError` and its HTTP rendering (status + JSON body)
 * - Collapse gate rejections: every credential failure renders as the same
 *   401 envelope, store trouble as a distinct 503
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// The one place gate rejections turn into HTTP. Missing, invalid and
// unknown-subject credentials must stay indistinguishable on the wire;
// only a store that cannot answer is allowed to look different.
impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NoCredentials | AuthError::InvalidToken(_) | AuthError::UnknownSubject => {
                AppError::Unauthorized
            }
            AuthError::LookupUnavailable(_) => AppError::ServiceUnavailable,
        }
    }
}
