//! Logs each inbound update in before() and the relay outcome in after().

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Always continues. Content is logged only as a length so guest text stays out of the log file.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = message.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_type = %message.message_type,
            content_len = message.content.chars().count(),
            is_reply = message.reply_to_message_id.is_some(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        info!(
            chat_id = message.chat.id,
            message_id = message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
