//! Token extraction strategies.
//!
//! Locating the raw credential in a request is separate from verifying it,
//! so alternate transports (query parameter, cookie) can be swapped in
//! without touching the verification path.
use axum::http::{header, request::Parts};

/// Strategy for locating the raw token in an incoming request.
///
/// `None` means "no credentials presented"; the gate maps it to
/// `NoCredentials` without attempting verification.
pub trait TokenExtractor: Send + Sync {
    fn extract<'r>(&self, parts: &'r Parts) -> Option<&'r str>;
}

/// `Authorization: Bearer <token>` extraction.
///
/// The scheme is matched case-insensitively (RFC 6750); a missing header,
/// a different scheme, or an empty token all count as no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerExtractor;

impl TokenExtractor for BearerExtractor {
    fn extract<'r>(&self, parts: &'r Parts) -> Option<&'r str> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?;

        let (scheme, token) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        Some(token)
    }
}
