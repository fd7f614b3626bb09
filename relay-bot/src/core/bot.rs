//! Platform abstraction for the message operations the relay consumes.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via
//! teloxide and tests substitute a recording mock.

use async_trait::async_trait;
use serde_json::Value;

use super::error::Result;

/// Message operations used by the relay. Every call returns the platform-assigned message id
/// on success; transport failures and non-ok API results are [`crate::RelayError::Transport`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32>;
    /// Forwards a message, preserving the original sender attribution.
    async fn forward_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32)
        -> Result<i32>;
    /// Copies a message without attribution.
    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32)
        -> Result<i32>;
    /// Points the platform webhook at `url`; returns the raw configuration result.
    async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<Value>;
    /// Removes the platform webhook; returns the raw configuration result.
    async fn delete_webhook(&self) -> Result<Value>;
}
