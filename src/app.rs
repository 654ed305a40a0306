use anyhow::Result;
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use std::{panic, process, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::user_repo::UserRepo;
use crate::services::auth::build_authenticator;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,notes_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // A missing or empty token secret aborts right here: the process must
    // never come up serving protected routes it cannot verify tokens for.
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting notes-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // The pool connects lazily: an unreachable store must not keep the
    // process from booting, it degrades lookups to per-request 503s.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&config.database_url)?;

    let store = Arc::new(UserRepo::new(pool));
    let authenticator = build_authenticator(config, store)?;

    Ok(AppState::new(authenticator))
}

fn build_router(state: AppState, config: &Config) -> Router {
    // Only the v1 tree sits behind the gate; /health stays public.
    let v1 = middleware::auth::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(api::v1::handlers::health::health))
        .nest("/api/v1", v1)
        .with_state(state);

    let router = middleware::http::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::security_headers::apply(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppEnv;
    use crate::services::auth::identity::IdentityStore;
    use crate::test_support::{StaticStore, TEST_SECRET, UnreachableStore, identity, sign_token};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            addr: SocketAddr::from_str("127.0.0.1:0").unwrap(),
            database_url: "postgres://unused".to_string(),
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            auth_token_secret: TEST_SECRET.to_string(),
            auth_token_leeway_seconds: 0,
            identity_lookup_timeout: Duration::from_millis(250),
        }
    }

    // The full production router (gate + ambient layers), with the store
    // swapped for a mock.
    fn test_router(store: Arc<dyn IdentityStore>) -> Router {
        let config = test_config();
        let authenticator = build_authenticator(&config, store).unwrap();
        build_router(AppState::new(authenticator), &config)
    }

    fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_responds_without_credentials() {
        let router = test_router(Arc::new(StaticStore::default()));

        let (status, body) = send(router, get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({"status": "ok"})
        );
    }

    #[tokio::test]
    async fn me_echoes_the_authenticated_identity() {
        let router = test_router(Arc::new(StaticStore::with([identity("user-42")])));
        let token = sign_token(TEST_SECRET, "user-42", 3600);

        let (status, body) = send(
            router,
            get_request("/api/v1/me", Some(&format!("Bearer {token}"))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let profile: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(profile["id"], "user-42");
        assert_eq!(profile["user_name"], "Jana");
        assert_eq!(profile["image_url"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn credential_rejections_are_indistinguishable_on_the_wire() {
        // Missing header, wrong scheme, wrong key, expired token, vanished
        // subject: all five must render the exact same 401 bytes, so the
        // response never tells a token guesser from an account enumerator.
        let expired = sign_token(TEST_SECRET, "user-42", -3600);
        let wrong_key = sign_token("wrong-secret", "user-42", 3600);
        let vanished = sign_token(TEST_SECRET, "user-9000", 3600);

        let headers: Vec<Option<String>> = vec![
            None,
            Some("Token abc.def.ghi".to_string()),
            Some(format!("Bearer {wrong_key}")),
            Some(format!("Bearer {expired}")),
            Some(format!("Bearer {vanished}")),
        ];

        let mut rendered = Vec::new();
        for authorization in &headers {
            let router = test_router(Arc::new(StaticStore::with([identity("user-42")])));
            let request = get_request("/api/v1/me", authorization.as_deref());
            rendered.push(send(router, request).await);
        }

        for (status, body) in &rendered {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, &rendered[0].1);
        }
    }

    #[tokio::test]
    async fn store_outage_is_a_distinct_503() {
        let router = test_router(Arc::new(UnreachableStore));
        let token = sign_token(TEST_SECRET, "user-42", 3600);

        let (status, body) = send(
            router,
            get_request("/api/v1/me", Some(&format!("Bearer {token}"))),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({
                "error": {"code": "SERVICE_UNAVAILABLE", "message": "service unavailable"}
            })
        );
    }

    #[tokio::test]
    async fn responses_carry_request_id_and_security_headers() {
        let router = test_router(Arc::new(StaticStore::default()));

        let response = router.oneshot(get_request("/health", None)).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            response.headers().get("referrer-policy").unwrap(),
            "no-referrer"
        );
    }
}
