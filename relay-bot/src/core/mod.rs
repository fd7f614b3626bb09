//! Core types and traits: Bot (platform operations), Handler, Message, error, logger.
//! Transport-agnostic; the teloxide adapter lives in [`crate::telegram`].

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
