//! Security-related response headers for browser clients.
//!
//! This middleware is intended to be applied at the Router level
//! (not inside individual handlers).
//!
//! Responsibility:
//! - Clickjacking protection
//! - MIME sniffing protection
//! - Referrer leakage control

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Apply common security headers to all responses.
pub fn apply(router: Router) -> Router {
    router
        // Clickjacking protection (legacy + modern)
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("content-security-policy"),
            HeaderValue::from_static("frame-ancestors 'none'"),
        ))
        // Prevent MIME sniffing
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        // Limit referrer leakage
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
}
