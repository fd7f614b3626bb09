//! Plain-text remote documents (start message, admin notification text).

use async_trait::async_trait;

use super::http::fetch_text;
use crate::core::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextDocument: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the document at a fixed URL on every call.
pub struct HttpTextDocument {
    client: reqwest::Client,
    url: String,
}

impl HttpTextDocument {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TextDocument for HttpTextDocument {
    async fn fetch(&self) -> Result<String> {
        fetch_text(&self.client, &self.url).await
    }
}
