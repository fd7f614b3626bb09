//! In-memory key-value store. Used with `RELAY_STORE_TYPE=memory` and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::kv::KvStore;

/// HashMap behind a tokio RwLock. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys starting with `prefix`.
    pub async fn count_prefix(&self, prefix: &str) -> usize {
        self.entries
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: Value) -> Result<bool, StorageError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value);
        Ok(true)
    }
}
