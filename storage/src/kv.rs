//! Key-value store trait. Values are JSON; no multi-key transaction is assumed.

use async_trait::async_trait;
use serde_json::Value;

use super::error::StorageError;

/// Async key-value store with JSON values.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, or None if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError>;
    /// Stores `value` only if `key` is absent. Returns true if the value was written.
    async fn put_if_absent(&self, key: &str, value: Value) -> Result<bool, StorageError>;
}
