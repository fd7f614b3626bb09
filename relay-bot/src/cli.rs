//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{BaseConfig, BotConfig};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Moderated Telegram relay bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the webhook (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Point the platform webhook at this service.
    Register {
        /// Public base URL; defaults to PUBLIC_BASE_URL.
        #[arg(short, long)]
        url: Option<String>,
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Remove the platform webhook.
    Unregister {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Full config for serving. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Platform-only config for registration commands.
pub fn load_base_config(token: Option<String>) -> Result<BaseConfig> {
    BaseConfig::load(token)
}
