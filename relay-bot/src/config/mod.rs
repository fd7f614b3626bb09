//! Bot configuration: BaseConfig (platform, log, store, HTTP server) + RelayConfig (relay policy and remote sources).

mod base;
mod bot_config;
mod relay;


pub use base::{BaseConfig, StoreType};
pub use bot_config::BotConfig;
pub use relay::{NotificationSettings, RelayConfig, RemoteSources};

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Reads a required variable.
pub(crate) fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .with_context(|| format!("{name} not set"))
}

/// Reads the first set, non-empty variable among `names`.
pub(crate) fn optional_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|s| !s.trim().is_empty()))
}

/// Parses an optional variable, falling back to `default` when unset.
pub(crate) fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{name} is not valid ({raw}): {e}")),
        _ => Ok(default),
    }
}
