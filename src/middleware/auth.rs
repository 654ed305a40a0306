//! Bearer gate middleware: authenticate the request, put `AuthCtx` into the
//! extensions, or reject.
//!
//! The decision itself (extraction, verification, subject lookup) lives in
//! `services::auth`; this file only wires the outcome to HTTP. Accepted
//! requests continue with the resolved caller attached, rejected ones are
//! converted to the opaque error surface in `error.rs` and logged here with
//! the real reason.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Gate a route tree behind bearer authentication.
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, gate))
}

async fn gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // The authenticator reads only the request head; keep the body intact
    // for the inner service.
    let (mut parts, body) = req.into_parts();

    let identity = match state.authenticator.authenticate(&parts).await {
        Ok(identity) => identity,
        Err(err) => {
            log_rejection(&err);
            return Err(AppError::from(err));
        }
    };

    // middleware → extractor への受け渡し
    parts.extensions.insert(AuthCtx::new(identity));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

// The wire response is opaque (the collapse happens in error.rs); the log
// keeps the real reason. Requests without credentials are not logged at
// all: unauthenticated probes are noise, not signal.
fn log_rejection(err: &AuthError) {
    match err {
        AuthError::NoCredentials => {}
        AuthError::InvalidToken(_) | AuthError::UnknownSubject => {
            tracing::warn!(error = ?err, "bearer authentication rejected");
        }
        AuthError::LookupUnavailable(_) => {
            tracing::error!(error = ?err, "identity lookup unavailable");
        }
    }
}
