//! Word-list source (two remote documents) and persistence sink (one overwrite of both).

use async_trait::async_trait;
use tracing::info;

use super::http::fetch_json;
use crate::core::{RelayError, Result};
use crate::filter::{KeywordDatabase, WordListDocument, WordListKind};

#[async_trait]
pub trait WordListSource: Send + Sync {
    async fn fetch(&self, kind: WordListKind) -> Result<WordListDocument>;
}

#[async_trait]
pub trait WordListSink: Send + Sync {
    /// Replaces the remote record with `database`.
    async fn overwrite(&self, database: &KeywordDatabase) -> Result<()>;
}

pub struct HttpWordListSource {
    client: reqwest::Client,
    banned_url: String,
    ad_url: String,
}

impl HttpWordListSource {
    pub fn new(client: reqwest::Client, banned_url: impl Into<String>, ad_url: impl Into<String>) -> Self {
        Self {
            client,
            banned_url: banned_url.into(),
            ad_url: ad_url.into(),
        }
    }
}

#[async_trait]
impl WordListSource for HttpWordListSource {
    async fn fetch(&self, kind: WordListKind) -> Result<WordListDocument> {
        let url = match kind {
            WordListKind::Banned => &self.banned_url,
            WordListKind::Ad => &self.ad_url,
        };
        fetch_json(&self.client, url).await
    }
}

/// PUTs the keyword database as JSON with `Authorization: token <TOKEN>`.
pub struct HttpWordListSink {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpWordListSink {
    pub fn new(client: reqwest::Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl WordListSink for HttpWordListSink {
    async fn overwrite(&self, database: &KeywordDatabase) -> Result<()> {
        let response = self
            .client
            .put(&self.url)
            .header(reqwest::header::AUTHORIZATION, format!("token {}", self.token))
            .json(database)
            .send()
            .await
            .map_err(|e| RelayError::Transport(format!("PUT {}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::PersistConflict(format!(
                "sink returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        info!(url = %self.url, "Keyword database persisted");
        Ok(())
    }
}

/// Sink used when no persistence URL is configured; every write is rejected.
pub struct UnconfiguredSink;

#[async_trait]
impl WordListSink for UnconfiguredSink {
    async fn overwrite(&self, _database: &KeywordDatabase) -> Result<()> {
        Err(RelayError::PersistConflict(
            "no keyword persistence sink configured".to_string(),
        ))
    }
}
