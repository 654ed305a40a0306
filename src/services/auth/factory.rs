/// Factory: build the bearer-token `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::authenticator::{
    Authenticator, AuthenticatorBuildError, AuthenticatorConfig,
};
use crate::services::auth::extract::BearerExtractor;
use crate::services::auth::identity::IdentityStore;

pub fn build_authenticator(
    config: &Config,
    store: Arc<dyn IdentityStore>,
) -> Result<Arc<Authenticator>, AuthenticatorBuildError> {
    let authenticator = Authenticator::new(
        AuthenticatorConfig {
            secret: config.auth_token_secret.clone(),
            leeway_seconds: config.auth_token_leeway_seconds,
            lookup_timeout: config.identity_lookup_timeout,
        },
        Arc::new(BearerExtractor),
        store,
    )?;

    Ok(Arc::new(authenticator))
}
