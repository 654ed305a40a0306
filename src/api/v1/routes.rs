/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Everything in this tree requires a bearer credential; the gate itself is
 *   layered on in app.rs when the tree is nested, so no route here can be
 *   mounted outside it by accident
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::profile::me;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
