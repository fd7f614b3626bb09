//! Relay config: admin identity, remote document sources, notification throttle, filter policy.

use std::time::Duration;

use anyhow::Result;

use super::{optional_var, parsed_var, required_var};

/// Remote documents the relay reads from or writes to.
#[derive(Debug, Clone)]
pub struct RemoteSources {
    /// BAD_WORDS_URL
    pub bad_words_url: String,
    /// AD_WORDS_URL
    pub ad_words_url: String,
    /// KEYWORDS_PERSIST_URL or GITHUB_API_URL
    pub persist_url: Option<String>,
    /// KEYWORDS_PERSIST_TOKEN or GITHUB_TOKEN
    pub persist_token: String,
    /// FRAUD_DB_URL; fraud check is skipped when unset
    pub fraud_db_url: Option<String>,
    /// START_MSG_URL
    pub start_msg_url: Option<String>,
    /// NOTIFICATION_URL
    pub notification_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct NotificationSettings {
    /// ENABLE_NOTIFICATION
    pub enabled: bool,
    /// NOTIFY_INTERVAL_SECS
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// ADMIN_UID: the single admin chat; also the forward target.
    pub admin_uid: i64,
    pub sources: RemoteSources,
    pub notifications: NotificationSettings,
    /// FILTER_FAIL_OPEN: relay guest messages while word lists are unloaded.
    pub filter_fail_open: bool,
    /// MAX_MESSAGE_LENGTH: segment cap (in characters) for multi-part sends.
    pub max_message_length: usize,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        let admin_uid = required_var("ADMIN_UID")?
            .trim()
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("ADMIN_UID must be a chat id: {e}"))?;

        let sources = RemoteSources {
            bad_words_url: required_var("BAD_WORDS_URL")?,
            ad_words_url: required_var("AD_WORDS_URL")?,
            persist_url: optional_var(&["KEYWORDS_PERSIST_URL", "GITHUB_API_URL"]),
            persist_token: optional_var(&["KEYWORDS_PERSIST_TOKEN", "GITHUB_TOKEN"])
                .unwrap_or_default(),
            fraud_db_url: optional_var(&["FRAUD_DB_URL"]),
            start_msg_url: optional_var(&["START_MSG_URL"]),
            notification_url: optional_var(&["NOTIFICATION_URL"]),
        };

        let notifications = NotificationSettings {
            enabled: parsed_var("ENABLE_NOTIFICATION", false)?,
            interval: Duration::from_secs(parsed_var("NOTIFY_INTERVAL_SECS", 3600u64)?),
        };

        Ok(Self {
            admin_uid,
            sources,
            notifications,
            filter_fail_open: parsed_var("FILTER_FAIL_OPEN", false)?,
            max_message_length: parsed_var("MAX_MESSAGE_LENGTH", 4096usize)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let urls = [
            Some(("BAD_WORDS_URL", &self.sources.bad_words_url)),
            Some(("AD_WORDS_URL", &self.sources.ad_words_url)),
            self.sources.persist_url.as_ref().map(|u| ("KEYWORDS_PERSIST_URL", u)),
            self.sources.fraud_db_url.as_ref().map(|u| ("FRAUD_DB_URL", u)),
            self.sources.start_msg_url.as_ref().map(|u| ("START_MSG_URL", u)),
            self.sources.notification_url.as_ref().map(|u| ("NOTIFICATION_URL", u)),
        ];
        for (name, url) in urls.into_iter().flatten() {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.notifications.interval.is_zero() {
            anyhow::bail!("NOTIFY_INTERVAL_SECS must be greater than zero");
        }
        if self.max_message_length == 0 {
            anyhow::bail!("MAX_MESSAGE_LENGTH must be greater than zero");
        }
        Ok(())
    }
}
