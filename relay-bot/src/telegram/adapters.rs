//! teloxide → core type conversion.

use crate::core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Text messages carry their text; media messages carry their caption (possibly empty).
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let (content, message_type) = match msg.text() {
            Some(text) => (text.to_string(), "text"),
            None => (msg.caption().unwrap_or_default().to_string(), "media"),
        };
        let user = msg
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or(User {
                id: msg.chat.id.0,
                username: None,
                first_name: None,
                last_name: None,
            });

        Message {
            id: msg.id.0,
            user,
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: if msg.chat.is_private() {
                    "private".to_string()
                } else {
                    format!("{:?}", msg.chat.kind)
                },
            },
            content,
            message_type: message_type.to_string(),
            created_at: msg.date,
            reply_to_message_id: msg.reply_to_message().map(|m| m.id.0),
        }
    }
}
