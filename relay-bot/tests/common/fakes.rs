//! In-process stand-ins for the remote documents.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use relay_bot::filter::{KeywordDatabase, WordListDocument, WordListKind};
use relay_bot::remote::{FraudRegistry, TextDocument, WordListSink, WordListSource};
use relay_bot::{RelayError, Result};

pub fn doc(plain: &[&str], regex: &[&str]) -> WordListDocument {
    WordListDocument {
        plain: plain.iter().map(|s| s.to_string()).collect(),
        regex: regex.iter().map(|s| s.to_string()).collect(),
    }
}

pub struct StaticWordSource {
    pub banned: WordListDocument,
    pub ad: WordListDocument,
    pub unavailable: AtomicBool,
}

impl StaticWordSource {
    pub fn new(banned: WordListDocument, ad: WordListDocument) -> Self {
        Self {
            banned,
            ad,
            unavailable: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl WordListSource for StaticWordSource {
    async fn fetch(&self, kind: WordListKind) -> Result<WordListDocument> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RelayError::SourceUnavailable("503 Service Unavailable".to_string()));
        }
        Ok(match kind {
            WordListKind::Banned => self.banned.clone(),
            WordListKind::Ad => self.ad.clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub reject: AtomicBool,
    pub written: Mutex<Vec<KeywordDatabase>>,
}

#[async_trait]
impl WordListSink for RecordingSink {
    async fn overwrite(&self, database: &KeywordDatabase) -> Result<()> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(RelayError::PersistConflict("409 Conflict".to_string()));
        }
        self.written.lock().unwrap().push(database.clone());
        Ok(())
    }
}

pub struct StaticFraud(pub Vec<i64>);

#[async_trait]
impl FraudRegistry for StaticFraud {
    async fn fetch(&self) -> Result<Vec<i64>> {
        Ok(self.0.clone())
    }
}

/// Text document that either returns its text or fails.
pub struct StaticText(pub Option<String>);

#[async_trait]
impl TextDocument for StaticText {
    async fn fetch(&self) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| RelayError::SourceUnavailable("404 Not Found".to_string()))
    }
}
