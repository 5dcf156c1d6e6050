use crate::error::RepositoryError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A flat string-to-string store. Every write replaces the whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

/// Key-value slots kept in the `kv_store` SQLite table
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Create a new SqliteKvStore
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        if key.is_empty() {
            return Err(RepositoryError::InvalidInput("Key cannot be empty".to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Process-local store, used by tests and embedders without a database
#[derive(Default)]
pub struct MemoryKvStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot, bypassing validation
    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.slots.write().await.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        if key.is_empty() {
            return Err(RepositoryError::InvalidInput("Key cannot be empty".to_string()));
        }
        self.slots.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
