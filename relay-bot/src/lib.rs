//! # Relay bot
//!
//! Moderated message relay between anonymous users and one admin over the Telegram webhook API.
//! Guest messages pass a word-list filter and a block check, are forwarded to the admin, and the
//! forwarded id is mapped back to the sender so admin replies can be copied to them.

pub mod admin;
pub mod advisory;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod filter;
pub mod handlers;
pub mod relay;
pub mod remote;
pub mod runner;
pub mod telegram;
pub mod webhook;

pub use cli::{load_base_config, load_config, Cli, Commands};

pub use crate::core::{
    init_tracing, Bot, Chat, Handler, HandlerResponse, Message, RelayError, Result, ToCoreMessage,
    ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use admin::{AdminInterpreter, AdminOutcome};
pub use advisory::Advisory;
pub use components::{
    build_handler_chain, build_relay_components, create_kv_store, Collaborators, RelayComponents,
};
pub use config::{BaseConfig, BotConfig, RelayConfig};
pub use filter::{ContentFilter, Verdict, WordListCache, WordListKind};
pub use handlers::LoggingHandler;
pub use relay::{split_message, RelayEngine, RelayOutcome};
pub use runner::{prepare_logging, register_webhook, run_server, unregister_webhook};
pub use telegram::{TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
pub use webhook::{build_webhook_app, WebhookState};
