//! Inbound message as seen by the relay, with sender and chat identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sender identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat the message arrived in. For private chats `id` equals the sender id and is the
/// address replies are copied back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single inbound message with sender, chat, textual content and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Platform message id within `chat`.
    pub id: i32,
    pub user: User,
    pub chat: Chat,
    /// Text, or caption for media messages; empty when the message carries neither.
    pub content: String,
    /// `"text"` for text messages, otherwise `"media"`.
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    /// Id of the message this one replies to, if any.
    pub reply_to_message_id: Option<i32>,
}

impl Message {
    /// True when there is text to run through the content filter.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}
