//! Telegram transport: teloxide-backed [`crate::core::Bot`] and update conversion.

mod adapters;
mod bot_adapter;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
