//! Per-chat serialization of relay state mutations.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i64, Arc<Mutex<()>>>;

/// One async mutex per chat id. Held across block check, forward and mapping write for a
/// guest message, across block/unblock of that guest by the admin, and around the
/// notification throttle. Entries live only while someone holds or waits for them.
#[derive(Clone, Default)]
pub struct ChatLocks {
    inner: Arc<LockMap>,
}

/// Held lock for one chat. Dropping it removes the chat's entry when no other task
/// references it.
pub struct ChatGuard {
    chat_id: i64,
    guard: Option<OwnedMutexGuard<()>>,
    map: Arc<LockMap>,
}

impl Drop for ChatGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Clones are taken under the shard lock, so a count of 1 means nobody is waiting.
        self.map
            .remove_if(&self.chat_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl ChatLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for the chat's lock. The map shard is released before awaiting.
    pub async fn lock(&self, chat_id: i64) -> ChatGuard {
        let mutex = self.inner.entry(chat_id).or_default().clone();
        let guard = mutex.lock_owned().await;
        ChatGuard {
            chat_id,
            guard: Some(guard),
            map: self.inner.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
