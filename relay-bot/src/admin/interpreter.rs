//! Executes admin commands against the relay store and the word-list cache.

use std::sync::Arc;

use storage::RelayStore;
use tracing::{info, instrument, warn};

use super::command::{self, AdminCommand, ParsedCommand, ReplyContext};
use crate::core::{Bot, Message, RelayError, Result};
use crate::filter::{AddWordOutcome, WordListCache, WordListKind};
use crate::relay::{notices, ChatLocks};

/// What an admin message resulted in. Every variant has already been answered to the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome {
    WordAdded { kind: WordListKind, persisted: bool },
    WordAddFailed { kind: WordListKind },
    Usage,
    NotFound,
    SelfBlockRejected,
    Blocked { guest_id: i64 },
    Unblocked { guest_id: i64 },
    BlockStatus { guest_id: i64, blocked: bool },
    Copied { guest_id: i64, message_id: i32 },
    CopyFailed { guest_id: i64 },
}

pub struct AdminInterpreter {
    bot: Arc<dyn Bot>,
    store: RelayStore,
    cache: Arc<WordListCache>,
    locks: ChatLocks,
    admin_uid: i64,
}

impl AdminInterpreter {
    pub fn new(
        bot: Arc<dyn Bot>,
        store: RelayStore,
        cache: Arc<WordListCache>,
        locks: ChatLocks,
        admin_uid: i64,
    ) -> Self {
        Self {
            bot,
            store,
            cache,
            locks,
            admin_uid,
        }
    }

    #[instrument(skip(self, message), fields(message_id = message.id, reply_to = ?message.reply_to_message_id))]
    pub async fn dispatch(&self, message: &Message) -> Result<AdminOutcome> {
        let (command, context) = match command::parse(&message.content) {
            ParsedCommand::Command { command, context } => (command, context),
            ParsedCommand::Usage(usage) => {
                self.reply(usage).await;
                return Ok(AdminOutcome::Usage);
            }
        };
        info!(command = ?command, "step: admin command parsed");

        if let AdminCommand::AddWord { kind, word } = &command {
            return self.add_word(*kind, word).await;
        }

        let replied_to = match (context, message.reply_to_message_id) {
            (ReplyContext::Required, Some(id)) => id,
            _ => {
                self.reply(notices::ADMIN_USAGE).await;
                return Ok(AdminOutcome::Usage);
            }
        };

        let guest_id = match self.resolve_guest(replied_to).await {
            Ok(id) => id,
            Err(RelayError::NotFound(what)) => {
                warn!(replied_to, %what, "No relay mapping for reply");
                self.reply(notices::MAPPING_NOT_FOUND).await;
                return Ok(AdminOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };

        match command {
            AdminCommand::Block => self.block(guest_id).await,
            AdminCommand::Unblock => self.unblock(guest_id).await,
            AdminCommand::CheckBlock => self.check_block(guest_id).await,
            AdminCommand::RelayBack => self.relay_back(guest_id, message).await,
            AdminCommand::AddWord { kind, word } => self.add_word(kind, &word).await,
        }
    }

    async fn resolve_guest(&self, forwarded_message_id: i32) -> Result<i64> {
        self.store
            .mappings
            .resolve(forwarded_message_id)
            .await?
            .ok_or_else(|| RelayError::NotFound(format!("msg-map-{forwarded_message_id}")))
    }

    async fn add_word(&self, kind: WordListKind, word: &str) -> Result<AdminOutcome> {
        let label = match kind {
            WordListKind::Banned => "脏话",
            WordListKind::Ad => "广告",
        };

        let added = match self.cache.ensure_loaded().await {
            Ok(()) => self.cache.add_plain_word(kind, word).await,
            Err(e) => Err(e),
        };
        let outcome = match added {
            Ok(AddWordOutcome::Persisted) | Ok(AddWordOutcome::AlreadyPresent) => {
                self.reply(&format!("成功添加{label}关键词: {word}")).await;
                AdminOutcome::WordAdded {
                    kind,
                    persisted: true,
                }
            }
            Ok(AddWordOutcome::PersistFailed(e)) => {
                self.reply(&format!("添加{label}关键词时出错: {e}")).await;
                AdminOutcome::WordAdded {
                    kind,
                    persisted: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Keyword not added");
                self.reply(&format!("添加{label}关键词时出错: {e}")).await;
                AdminOutcome::WordAddFailed { kind }
            }
        };
        Ok(outcome)
    }

    async fn block(&self, guest_id: i64) -> Result<AdminOutcome> {
        if guest_id == self.admin_uid {
            self.reply(notices::CANNOT_BLOCK_SELF).await;
            return Ok(AdminOutcome::SelfBlockRejected);
        }
        {
            let _guard = self.locks.lock(guest_id).await;
            self.store.blocks.set_blocked(guest_id, true).await?;
        }
        self.reply(&notices::block_succeeded(guest_id)).await;
        Ok(AdminOutcome::Blocked { guest_id })
    }

    async fn unblock(&self, guest_id: i64) -> Result<AdminOutcome> {
        {
            let _guard = self.locks.lock(guest_id).await;
            self.store.blocks.set_blocked(guest_id, false).await?;
        }
        self.reply(&notices::unblock_succeeded(guest_id)).await;
        Ok(AdminOutcome::Unblocked { guest_id })
    }

    async fn check_block(&self, guest_id: i64) -> Result<AdminOutcome> {
        let blocked = self.store.blocks.is_blocked(guest_id).await?;
        self.reply(&notices::block_status(guest_id, blocked)).await;
        Ok(AdminOutcome::BlockStatus { guest_id, blocked })
    }

    async fn relay_back(&self, guest_id: i64, message: &Message) -> Result<AdminOutcome> {
        match self
            .bot
            .copy_message(guest_id, message.chat.id, message.id)
            .await
        {
            Ok(message_id) => {
                info!(guest_id, message_id, "step: reply copied to guest");
                Ok(AdminOutcome::Copied {
                    guest_id,
                    message_id,
                })
            }
            Err(e) => {
                warn!(guest_id, error = %e, "Copy to guest failed");
                self.reply(&notices::copy_failed(guest_id, &e.to_string())).await;
                Ok(AdminOutcome::CopyFailed { guest_id })
            }
        }
    }

    async fn reply(&self, text: &str) {
        if let Err(e) = self.bot.send_message(self.admin_uid, text).await {
            warn!(error = %e, "Failed to answer admin");
        }
    }
}
