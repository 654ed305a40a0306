/*
 * Responsibility
 * - Load environment configuration (listen address, DATABASE_URL, auth settings)
 * - Validate at startup: a missing or empty token secret must abort boot,
 *   never degrade into per-request errors
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Shared HMAC key for bearer token verification. Never logged.
    pub auth_token_secret: String,
    pub auth_token_leeway_seconds: u64,
    pub identity_lookup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_token_secret = std::env::var("AUTH_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("AUTH_TOKEN_SECRET"))?;
        if auth_token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_TOKEN_SECRET"));
        }

        // Default 0: an expired token is rejected the second it expires.
        // Deployments with real clock skew can opt into a small window.
        let auth_token_leeway_seconds = std::env::var("AUTH_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let identity_lookup_timeout_ms = std::env::var("AUTH_LOOKUP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5_000);

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_token_secret,
            auth_token_leeway_seconds,
            identity_lookup_timeout: Duration::from_millis(identity_lookup_timeout_ms),
        })
    }
}
