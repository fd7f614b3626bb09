//! Post-relay advisory steps: fraud registry lookup and the admin notification throttle.
//!
//! Runs only after a message has been forwarded and its mapping written. Nothing here returns
//! an error to the caller; failures are logged and the relay outcome stands.

mod throttle;

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::core::Bot;
use crate::relay::notices;
use crate::remote::{FraudRegistry, TextDocument};

pub use throttle::NotificationThrottle;

/// Throttle plus the document supplying the notification text.
pub struct Notifier {
    pub throttle: NotificationThrottle,
    pub text: Option<Arc<dyn TextDocument>>,
}

pub struct Advisory {
    bot: Arc<dyn Bot>,
    admin_uid: i64,
    fraud: Option<Arc<dyn FraudRegistry>>,
    notifier: Option<Notifier>,
}

impl Advisory {
    pub fn new(
        bot: Arc<dyn Bot>,
        admin_uid: i64,
        fraud: Option<Arc<dyn FraudRegistry>>,
        notifier: Option<Notifier>,
    ) -> Self {
        Self {
            bot,
            admin_uid,
            fraud,
            notifier,
        }
    }

    /// A chat found in the fraud registry is reported to the admin and the notification step
    /// is skipped for that message.
    #[instrument(skip(self))]
    pub async fn after_relay(&self, chat_id: i64) {
        if self.check_fraud(chat_id).await {
            warn!(chat_id, "step: sender is in fraud registry");
            self.send_admin(&notices::fraud_alert(chat_id)).await;
            return;
        }
        self.notify(chat_id).await;
    }

    /// Registry membership. Fetch or decode failures count as not fraud.
    pub async fn check_fraud(&self, chat_id: i64) -> bool {
        let Some(registry) = &self.fraud else {
            return false;
        };
        match registry.fetch().await {
            Ok(ids) => ids.contains(&chat_id),
            Err(e) => {
                warn!(chat_id, error = %e, "Fraud registry unavailable, treating as not fraud");
                false
            }
        }
    }

    async fn notify(&self, chat_id: i64) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        match notifier.throttle.claim(chat_id, Utc::now()).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                warn!(chat_id, error = %e, "Notification throttle unavailable");
                return;
            }
        }

        let text = match &notifier.text {
            Some(doc) => match doc.fetch().await {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => notices::DEFAULT_NOTIFICATION.to_string(),
                Err(e) => {
                    warn!(error = %e, "Notification text unavailable, using default");
                    notices::DEFAULT_NOTIFICATION.to_string()
                }
            },
            None => notices::DEFAULT_NOTIFICATION.to_string(),
        };
        info!(chat_id, "step: admin notified");
        self.send_admin(&text).await;
    }

    async fn send_admin(&self, text: &str) {
        if let Err(e) = self.bot.send_message(self.admin_uid, text).await {
            warn!(error = %e, "Failed to send advisory message to admin");
        }
    }
}
