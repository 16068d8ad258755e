//! # Key/Value Repository
//!
//! Raw string storage backing every persisted document.
//!
//! ## Table
//! ```text
//! app_storage
//! ┌──────────────────┬──────────────────────────────┬───────────────────────────┐
//! │ key (PK)         │ value                        │ updated_at                │
//! ├──────────────────┼──────────────────────────────┼───────────────────────────┤
//! │ beshob_settings  │ {"name":"Beshob",...}        │ 2024-05-01T10:15:00+00:00 │
//! │ beshob_products  │ [{"id":"…",...}]             │ 2024-05-01T10:16:42+00:00 │
//! └──────────────────┴──────────────────────────────┴───────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the `app_storage` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Returns the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM app_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Storage read");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO app_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Storage write");
        Ok(())
    }

    /// Removes `key`. Returns whether a row was deleted.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM app_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns when `key` was last written (RFC 3339), if it exists.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<String>> {
        let ts: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM app_storage WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(ts)
    }
}
