//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use async_trait::async_trait;
use serde_json::{json, Value};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::{info, instrument};

use crate::core::{Bot as CoreBot, RelayError, Result};

pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Builds the teloxide bot, pointing it at `api_url` when one is configured.
    pub fn from_token(token: &str, api_url: Option<&str>) -> Result<Self> {
        let mut bot = teloxide::Bot::new(token);
        if let Some(url) = api_url {
            let url = reqwest::Url::parse(url)
                .map_err(|e| RelayError::Config(format!("invalid Bot API URL {url}: {e}")))?;
            bot = bot.set_api_url(url);
        }
        Ok(Self::new(bot))
    }

    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn transport(e: teloxide::RequestError) -> RelayError {
    RelayError::Transport(e.to_string())
}

/// Shape of the configuration result handed back to registration callers.
fn config_result(result: std::result::Result<teloxide::types::True, teloxide::RequestError>) -> Value {
    match result {
        Ok(_) => json!({ "ok": true, "result": true }),
        Err(e) => json!({ "ok": false, "description": e.to_string() }),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(transport)?;
        Ok(sent.id.0)
    }

    async fn forward_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<i32> {
        let forwarded = self
            .bot
            .forward_message(ChatId(to_chat_id), ChatId(from_chat_id), MessageId(message_id))
            .await
            .map_err(transport)?;
        Ok(forwarded.id.0)
    }

    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<i32> {
        let copied = self
            .bot
            .copy_message(ChatId(to_chat_id), ChatId(from_chat_id), MessageId(message_id))
            .await
            .map_err(transport)?;
        Ok(copied.0)
    }

    #[instrument(skip(self, secret_token))]
    async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<Value> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| RelayError::Config(format!("invalid webhook URL {url}: {e}")))?;
        let result = self
            .bot
            .set_webhook(url)
            .secret_token(secret_token.to_string())
            .await;
        info!(ok = result.is_ok(), "setWebhook called");
        Ok(config_result(result))
    }

    async fn delete_webhook(&self) -> Result<Value> {
        let result = self.bot.delete_webhook().await;
        info!(ok = result.is_ok(), "deleteWebhook called");
        Ok(config_result(result))
    }
}
