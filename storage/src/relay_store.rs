//! Typed repositories over one [`KvStore`].
//!
//! Three logically distinct maps share the store through namespaced keys:
//!
//! | Repository | Key | Value |
//! |---|---|---|
//! | [`RelayMappingRepository`] | `msg-map-<forwarded message id>` | origin chat id |
//! | [`BlockRepository`] | `isblocked-<chat id>` | bool |
//! | [`NotificationRepository`] | `lastmsg-<chat id>` | epoch millis |

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::kv::KvStore;

const MAPPING_PREFIX: &str = "msg-map-";
const BLOCK_PREFIX: &str = "isblocked-";
const NOTIFY_PREFIX: &str = "lastmsg-";

fn mapping_key(forwarded_message_id: i32) -> String {
    format!("{MAPPING_PREFIX}{forwarded_message_id}")
}

fn block_key(chat_id: i64) -> String {
    format!("{BLOCK_PREFIX}{chat_id}")
}

fn notify_key(chat_id: i64) -> String {
    format!("{NOTIFY_PREFIX}{chat_id}")
}

/// Reads an integer that may have been written as a JSON number or a numeric string.
fn as_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Forwarded-message id → origin chat id. Entries are written once and never updated.
#[derive(Clone)]
pub struct RelayMappingRepository {
    kv: Arc<dyn KvStore>,
}

impl RelayMappingRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Records the origin of a forwarded message. Returns false if an entry already existed;
    /// the existing entry is left untouched.
    pub async fn record(
        &self,
        forwarded_message_id: i32,
        origin_chat_id: i64,
    ) -> Result<bool, StorageError> {
        let written = self
            .kv
            .put_if_absent(&mapping_key(forwarded_message_id), Value::from(origin_chat_id))
            .await?;
        if written {
            info!(forwarded_message_id, origin_chat_id, "Relay mapping recorded");
        } else {
            warn!(forwarded_message_id, "Relay mapping already present, not overwritten");
        }
        Ok(written)
    }

    /// Returns the origin chat id for a forwarded message, or None if unknown or expired.
    pub async fn resolve(&self, forwarded_message_id: i32) -> Result<Option<i64>, StorageError> {
        let value = self.kv.get(&mapping_key(forwarded_message_id)).await?;
        Ok(value.as_ref().and_then(as_i64))
    }
}

/// Chat id → blocked flag. An absent key means not blocked.
#[derive(Clone)]
pub struct BlockRepository {
    kv: Arc<dyn KvStore>,
}

impl BlockRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn is_blocked(&self, chat_id: i64) -> Result<bool, StorageError> {
        let value = self.kv.get(&block_key(chat_id)).await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    pub async fn set_blocked(&self, chat_id: i64, blocked: bool) -> Result<(), StorageError> {
        self.kv.put(&block_key(chat_id), Value::Bool(blocked)).await?;
        info!(chat_id, blocked, "Block state updated");
        Ok(())
    }
}

/// Chat id → last time the admin was notified about that chat.
#[derive(Clone)]
pub struct NotificationRepository {
    kv: Arc<dyn KvStore>,
}

impl NotificationRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn last_notified(&self, chat_id: i64) -> Result<Option<DateTime<Utc>>, StorageError> {
        let value = self.kv.get(&notify_key(chat_id)).await?;
        Ok(value
            .as_ref()
            .and_then(as_i64)
            .and_then(DateTime::<Utc>::from_timestamp_millis))
    }

    pub async fn mark_notified(&self, chat_id: i64, at: DateTime<Utc>) -> Result<(), StorageError> {
        self.kv
            .put(&notify_key(chat_id), Value::from(at.timestamp_millis()))
            .await
    }
}

/// The three relay repositories over a single store.
#[derive(Clone)]
pub struct RelayStore {
    pub mappings: RelayMappingRepository,
    pub blocks: BlockRepository,
    pub notifications: NotificationRepository,
}

impl RelayStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            mappings: RelayMappingRepository::new(kv.clone()),
            blocks: BlockRepository::new(kv.clone()),
            notifications: NotificationRepository::new(kv),
        }
    }
}
