use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Result, StoreKey, store::StateStore};

/// PostgreSQL-backed state store implementation.
///
/// All state lives in a single `storefront_state` table with one JSONB
/// value per key; `set` is an upsert on the key column.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL state store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl StateStore for PostgresStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<serde_json::Value>> {
        let row: Option<PgRow> =
            sqlx::query("SELECT value FROM storefront_state WHERE key = $1")
                .bind(key.storage_key())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &StoreKey, value: serde_json::Value) -> Result<()> {
        tracing::debug!(key = %key, "writing state entry");

        sqlx::query(
            r#"
            INSERT INTO storefront_state (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key.storage_key())
        .bind(&value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
