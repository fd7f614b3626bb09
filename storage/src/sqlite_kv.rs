//! SQLite-backed key-value store.
//!
//! One table `kv_entries`; values are stored as JSON text.

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use serde_json::Value;
use tracing::debug;

use crate::error::StorageError;
use crate::kv::KvStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteKvStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteKvStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating kv_entries table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        match row {
            Some((raw,)) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&value)?;

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&raw)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        debug!(key = %key, "kv put");
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: Value) -> Result<bool, StorageError> {
        let raw = serde_json::to_string(&value)?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?)",
        )
        .bind(key)
        .bind(&raw)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        let written = result.rows_affected() == 1;
        debug!(key = %key, written, "kv put_if_absent");
        Ok(written)
    }
}
