/*
 * Responsibility
 * - SQLx access to the users table
 * - Implements the gate's IdentityStore: one point lookup per request
 * - Classifies driver errors into transport vs query failures
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::services::auth::identity::{Identity, IdentityStore, IdentityStoreError};

#[derive(Debug, FromRow)]
struct UserRow {
    #[sqlx(rename = "userId")]
    id: String,
    #[sqlx(rename = "userName")]
    user_name: String,
    #[sqlx(rename = "imageUrl")]
    image_url: Option<String>,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl From<UserRow> for Identity {
    fn from(row: UserRow) -> Self {
        Identity {
            id: row.id,
            user_name: row.user_name,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for UserRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, IdentityStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT "userId", "userName", "imageUrl", "createdAt"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(Identity::from))
    }
}

fn classify(e: sqlx::Error) -> IdentityStoreError {
    match &e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => IdentityStoreError::Connection(e.to_string()),
        _ => IdentityStoreError::Query(e.to_string()),
    }
}
