//! Key-value storage backends.
//!
//! Every stored collection is one JSON document under a fixed key, read and
//! replaced as a whole. [`SqliteStore`] persists to a SQLite database and
//! [`MemoryStore`] keeps everything in process memory.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::{error::StoreError, repositories::kv};

/// Whole-value storage of JSON documents by key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replace the document stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Remove the document stored under `key`
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store backed by the `kv_store` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(kv::get_value(&self.pool, key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        kv::put_value(&self.pool, key, &value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = kv::delete_value(&self.pool, key).await?;
        tracing::debug!(key, removed, "Removed stored value");
        Ok(())
    }
}

/// Store that keeps documents in memory, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
