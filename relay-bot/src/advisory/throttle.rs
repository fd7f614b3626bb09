//! Per-chat admin notification throttle.

use chrono::{DateTime, Duration, Utc};
use storage::NotificationRepository;
use tracing::debug;

use crate::core::Result;
use crate::relay::ChatLocks;

pub struct NotificationThrottle {
    repo: NotificationRepository,
    interval: Duration,
    locks: ChatLocks,
}

impl NotificationThrottle {
    pub fn new(
        repo: NotificationRepository,
        interval: std::time::Duration,
        locks: ChatLocks,
    ) -> Self {
        Self {
            repo,
            interval: Duration::from_std(interval).unwrap_or(Duration::MAX),
            locks,
        }
    }

    /// True when the chat was never notified or the last notification is older than the
    /// interval; in that case the timestamp is moved to `now` before returning. Read and write
    /// happen under the chat's lock, so one chat is claimed at most once per interval.
    pub async fn claim(&self, chat_id: i64, now: DateTime<Utc>) -> Result<bool> {
        let _guard = self.locks.lock(chat_id).await;
        let due = match self.repo.last_notified(chat_id).await? {
            None => true,
            Some(last) => now.signed_duration_since(last) > self.interval,
        };
        if due {
            self.repo.mark_notified(chat_id, now).await?;
        } else {
            debug!(chat_id, "Notification throttled");
        }
        Ok(due)
    }
}
