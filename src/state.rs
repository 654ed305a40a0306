/*
 * Responsibility
 * - Shared context handed to the Router (AppState)
 * - Cloned per request, so contents stay Arc/Clone cheap
 */
use std::sync::Arc;

use crate::services::auth::Authenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}
