//! Relay engine: single entry point for every inbound message.
//!
//! Order: `/start` → filter gate → admin interpreter (admin chat) → guest relay. The guest path
//! holds the chat's lock across block check, forward and mapping write so that concurrent
//! updates for one chat and admin block/unblock of that chat do not interleave.

use std::sync::Arc;

use async_trait::async_trait;
use storage::RelayStore;
use tracing::{error, info, instrument, warn};

use super::locks::ChatLocks;
use super::notices;
use super::start::StartFlow;
use crate::admin::{AdminInterpreter, AdminOutcome};
use crate::advisory::Advisory;
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};
use crate::filter::{ContentFilter, Verdict};

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    StartSent { segments: usize },
    StartFailed,
    /// Rejected by the content filter; the sender got the matching notice.
    Rejected(Verdict),
    Blocked,
    ForwardFailed,
    /// Forwarded to the admin. `mapped` is false when the mapping write failed and the admin
    /// cannot reply through this message.
    Relayed { forwarded_message_id: i32, mapped: bool },
    Admin(AdminOutcome),
}

pub struct RelayEngine {
    bot: Arc<dyn Bot>,
    store: RelayStore,
    filter: ContentFilter,
    admin: AdminInterpreter,
    advisory: Advisory,
    start: StartFlow,
    locks: ChatLocks,
    admin_uid: i64,
    filter_fail_open: bool,
}

impl RelayEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bot: Arc<dyn Bot>,
        store: RelayStore,
        filter: ContentFilter,
        admin: AdminInterpreter,
        advisory: Advisory,
        start: StartFlow,
        locks: ChatLocks,
        admin_uid: i64,
        filter_fail_open: bool,
    ) -> Self {
        Self {
            bot,
            store,
            filter,
            admin,
            advisory,
            start,
            locks,
            admin_uid,
            filter_fail_open,
        }
    }

    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = message.id))]
    pub async fn process(&self, message: &Message) -> Result<RelayOutcome> {
        let chat_id = message.chat.id;
        let is_admin = chat_id == self.admin_uid;

        if message.content.trim() == "/start" {
            return Ok(match self.start.run(chat_id).await {
                Ok(segments) => RelayOutcome::StartSent { segments },
                Err(_) => RelayOutcome::StartFailed,
            });
        }

        if let Some(verdict) = self.gate(message, is_admin).await {
            return Ok(RelayOutcome::Rejected(verdict));
        }

        if is_admin {
            return Ok(RelayOutcome::Admin(self.admin.dispatch(message).await?));
        }

        self.relay_guest(message).await
    }

    /// Runs the content filter. Returns the verdict when the message must not go further; the
    /// sender has been notified in that case.
    async fn gate(&self, message: &Message, is_admin: bool) -> Option<Verdict> {
        if !message.has_content() {
            return None;
        }
        let verdict = self.filter.classify(&message.content).await;
        let notice = match verdict {
            Verdict::Clean => return None,
            Verdict::Unloaded if is_admin || self.filter_fail_open => {
                warn!(is_admin, "Word lists unloaded, message passed unfiltered");
                return None;
            }
            Verdict::BadWord => notices::BAD_WORD_REJECTED,
            Verdict::AdWord => notices::AD_WORD_REJECTED,
            Verdict::Unloaded => notices::FILTER_UNAVAILABLE,
        };
        info!(verdict = ?verdict, "step: message rejected by filter");
        self.notify(message.chat.id, notice).await;
        Some(verdict)
    }

    async fn relay_guest(&self, message: &Message) -> Result<RelayOutcome> {
        let chat_id = message.chat.id;
        let outcome = {
            let _guard = self.locks.lock(chat_id).await;

            let blocked = match self.store.blocks.is_blocked(chat_id).await {
                Ok(blocked) => blocked,
                Err(e) => {
                    error!(error = %e, "Block state unavailable, message not relayed");
                    self.notify(chat_id, notices::FORWARD_FAILED).await;
                    return Err(e.into());
                }
            };
            if blocked {
                info!("step: sender is blocked");
                self.notify(chat_id, notices::BLOCKED).await;
                return Ok(RelayOutcome::Blocked);
            }

            let forwarded_message_id = match self
                .bot
                .forward_message(self.admin_uid, chat_id, message.id)
                .await
            {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "Forward to admin failed");
                    self.notify(chat_id, notices::FORWARD_FAILED).await;
                    return Ok(RelayOutcome::ForwardFailed);
                }
            };

            let mapped = match self.store.mappings.record(forwarded_message_id, chat_id).await {
                Ok(written) => written,
                Err(e) => {
                    error!(
                        forwarded_message_id,
                        error = %e,
                        "Mapping write failed after forward, admin replies to this message cannot be routed"
                    );
                    false
                }
            };
            info!(forwarded_message_id, mapped, "step: message relayed");
            RelayOutcome::Relayed {
                forwarded_message_id,
                mapped,
            }
        };

        self.advisory.after_relay(chat_id).await;
        Ok(outcome)
    }

    async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.bot.send_message(chat_id, text).await {
            warn!(chat_id, error = %e, "Failed to send notice");
        }
    }
}

#[async_trait]
impl Handler for RelayEngine {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let outcome = self.process(message).await?;
        info!(outcome = ?outcome, "step: relay finished");
        Ok(HandlerResponse::Stop)
    }
}
