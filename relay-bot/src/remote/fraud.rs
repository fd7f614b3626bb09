//! Fraud registry: a remote JSON array of chat ids. Not cached; every check re-fetches.

use async_trait::async_trait;
use serde_json::Value;

use super::http::fetch_json;
use crate::core::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FraudRegistry: Send + Sync {
    /// Current registry contents.
    async fn fetch(&self) -> Result<Vec<i64>>;
}

pub struct HttpFraudRegistry {
    client: reqwest::Client,
    url: String,
}

impl HttpFraudRegistry {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FraudRegistry for HttpFraudRegistry {
    async fn fetch(&self) -> Result<Vec<i64>> {
        let entries: Vec<Value> = fetch_json(&self.client, &self.url).await?;
        // Ids may be published as numbers or numeric strings; anything else is skipped.
        Ok(entries
            .iter()
            .filter_map(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .collect())
    }
}
