//! Base config: bot connection, logging, relay store, HTTP server. Loaded from env.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Result;

use super::{optional_var, parsed_var, required_var};

/// Backing store for the relay maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Memory,
}

impl FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store type '{other}', expected sqlite or memory")),
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Base config: platform connectivity, logging, store and server only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// BOT_SECRET: shared secret expected in the webhook header
    pub webhook_secret: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// RELAY_STORE_TYPE
    pub store_type: StoreType,
    /// DATABASE_URL: SQLite file path or `sqlite:` URL
    pub database_url: String,
    /// LISTEN_ADDR
    pub listen_addr: SocketAddr,
    /// WEBHOOK_PATH
    pub webhook_path: String,
    /// PUBLIC_BASE_URL: used to build the webhook URL on registration; derived from the request host when unset
    pub public_base_url: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => required_var("BOT_TOKEN")?,
        };
        let webhook_secret = required_var("BOT_SECRET")?;
        let telegram_api_url = optional_var(&["TELEGRAM_API_URL", "TELOXIDE_API_URL"]);
        let log_file = optional_var(&["LOG_FILE"]).unwrap_or_else(|| "logs/relay-bot.log".to_string());
        let store_type = parsed_var("RELAY_STORE_TYPE", StoreType::Sqlite)?;
        let database_url = optional_var(&["DATABASE_URL"]).unwrap_or_else(|| "relay_bot.db".to_string());
        let listen_addr = parsed_var("LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?;
        let webhook_path = optional_var(&["WEBHOOK_PATH"]).unwrap_or_else(|| "/endpoint".to_string());
        let public_base_url = optional_var(&["PUBLIC_BASE_URL"]);

        Ok(Self {
            bot_token,
            webhook_secret,
            telegram_api_url,
            log_file,
            store_type,
            database_url,
            listen_addr,
            webhook_path,
            public_base_url,
        })
    }

    /// Validate config (URLs parse, webhook path is absolute).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.public_base_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("PUBLIC_BASE_URL is not a valid URL: {}", url_str);
            }
        }
        if !self.webhook_path.starts_with('/') {
            anyhow::bail!("WEBHOOK_PATH must start with '/': {}", self.webhook_path);
        }
        Ok(())
    }
}
