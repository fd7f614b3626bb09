//! Process-wide word-list cache.
//!
//! Starts Unloaded (`None`), which is distinct from loaded-but-empty. `ensure_loaded` fetches
//! both documents and swaps them in together; concurrent first uses share one fetch through
//! `load_lock`. Readers take an `Arc` snapshot and never observe a half-applied update.
//! Word additions also hold `load_lock` through the remote write, so sink writes land in
//! the order the additions were made and a reload cannot drop an added word.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use super::word_list::{WordListKind, WordLists};
use crate::core::{RelayError, Result};
use crate::remote::{WordListSink, WordListSource};

/// Result of [`WordListCache::add_plain_word`]. The word is live in memory in every variant.
#[derive(Debug)]
pub enum AddWordOutcome {
    /// Added and written to the sink.
    Persisted,
    /// Already present; nothing written.
    AlreadyPresent,
    /// Added in memory; the sink write failed and the error is carried for the caller to report.
    PersistFailed(RelayError),
}

pub struct WordListCache {
    source: Arc<dyn WordListSource>,
    sink: Arc<dyn WordListSink>,
    lists: RwLock<Option<Arc<WordLists>>>,
    load_lock: Mutex<()>,
}

impl WordListCache {
    pub fn new(source: Arc<dyn WordListSource>, sink: Arc<dyn WordListSink>) -> Self {
        Self {
            source,
            sink,
            lists: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// Current lists, or None while unloaded.
    pub async fn snapshot(&self) -> Option<Arc<WordLists>> {
        self.lists.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.lists.read().await.is_some()
    }

    /// Loads both lists if not loaded yet. A failure leaves the cache unloaded so the next
    /// call retries.
    pub async fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded().await {
            return Ok(());
        }
        let _guard = self.load_lock.lock().await;
        if self.is_loaded().await {
            return Ok(());
        }
        self.load_locked().await
    }

    /// Fetches both lists again and replaces the current ones. On failure the previous lists
    /// stay in place.
    pub async fn reload(&self) -> Result<()> {
        let _guard = self.load_lock.lock().await;
        self.load_locked().await
    }

    /// Drops the loaded lists; the next `ensure_loaded` fetches again.
    pub async fn invalidate(&self) {
        let _guard = self.load_lock.lock().await;
        *self.lists.write().await = None;
        info!("Word lists invalidated");
    }

    #[instrument(skip(self))]
    async fn load_locked(&self) -> Result<()> {
        let (banned, ad) = tokio::join!(
            self.source.fetch(WordListKind::Banned),
            self.source.fetch(WordListKind::Ad)
        );
        let (banned, ad) = match (banned, ad) {
            (Ok(b), Ok(a)) => (b, a),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Word list fetch failed");
                return Err(match e {
                    RelayError::SourceUnavailable(_) => e,
                    other => RelayError::SourceUnavailable(other.to_string()),
                });
            }
        };

        let lists = WordLists::compile(&banned, &ad).map_err(|e| {
            warn!(error = %e, "Word list contains an invalid pattern");
            RelayError::SourceUnavailable(format!("invalid pattern: {e}"))
        })?;

        info!(
            banned_plain = lists.banned.plain().len(),
            banned_regex = lists.banned.regex_count(),
            ad_plain = lists.ad.plain().len(),
            ad_regex = lists.ad.regex_count(),
            "Word lists loaded"
        );
        *self.lists.write().await = Some(Arc::new(lists));
        Ok(())
    }

    /// Adds a plain word to one list and persists both lists.
    ///
    /// The in-memory addition is kept even when persisting fails.
    #[instrument(skip(self))]
    pub async fn add_plain_word(&self, kind: WordListKind, word: &str) -> Result<AddWordOutcome> {
        let _guard = self.load_lock.lock().await;
        {
            let mut guard = self.lists.write().await;
            let current = guard.as_ref().ok_or_else(|| {
                RelayError::SourceUnavailable("word lists are not loaded".to_string())
            })?;
            if current.get(kind).plain().iter().any(|w| w == word) {
                return Ok(AddWordOutcome::AlreadyPresent);
            }
            let mut updated = WordLists::clone(current);
            updated.get_mut(kind).add_plain(word);
            *guard = Some(Arc::new(updated));
        }
        info!(list = %kind, word = %word, "Plain word added");

        match self.persist_locked().await {
            Ok(()) => Ok(AddWordOutcome::Persisted),
            Err(e) => {
                warn!(error = %e, list = %kind, "Word added in memory but persist failed");
                Ok(AddWordOutcome::PersistFailed(e))
            }
        }
    }

    /// Writes both lists (patterns as source strings) to the sink.
    pub async fn persist(&self) -> Result<()> {
        let _guard = self.load_lock.lock().await;
        self.persist_locked().await
    }

    async fn persist_locked(&self) -> Result<()> {
        let snapshot = self.snapshot().await.ok_or_else(|| {
            RelayError::SourceUnavailable("word lists are not loaded".to_string())
        })?;
        self.sink.overwrite(&snapshot.to_database()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::filter::{KeywordDatabase, Verdict, WordListDocument};

    struct FakeSource {
        banned: WordListDocument,
        ad: WordListDocument,
        fail_ad: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(banned_plain: &[&str], banned_regex: &[&str]) -> Self {
            Self {
                banned: WordListDocument {
                    plain: banned_plain.iter().map(|s| s.to_string()).collect(),
                    regex: banned_regex.iter().map(|s| s.to_string()).collect(),
                },
                ad: WordListDocument::default(),
                fail_ad: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WordListSource for FakeSource {
        async fn fetch(&self, kind: WordListKind) -> Result<WordListDocument> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match kind {
                WordListKind::Banned => Ok(self.banned.clone()),
                WordListKind::Ad if self.fail_ad.load(Ordering::SeqCst) => {
                    Err(RelayError::Transport("connection refused".to_string()))
                }
                WordListKind::Ad => Ok(self.ad.clone()),
            }
        }
    }

    #[derive(Default)]
    struct FakeSink {
        reject: AtomicBool,
        slow_first_write: AtomicBool,
        written: std::sync::Mutex<Vec<KeywordDatabase>>,
    }

    #[async_trait]
    impl WordListSink for FakeSink {
        async fn overwrite(&self, database: &KeywordDatabase) -> Result<()> {
            if self.slow_first_write.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
            if self.reject.load(Ordering::SeqCst) {
                return Err(RelayError::PersistConflict("409".to_string()));
            }
            self.written.lock().unwrap().push(database.clone());
            Ok(())
        }
    }

    fn cache(source: Arc<FakeSource>, sink: Arc<FakeSink>) -> WordListCache {
        WordListCache::new(source, sink)
    }

    #[tokio::test]
    async fn test_starts_unloaded() {
        let c = cache(Arc::new(FakeSource::new(&[], &[])), Arc::new(FakeSink::default()));
        assert!(c.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let source = Arc::new(FakeSource::new(&["spam"], &[]));
        let c = cache(source.clone(), Arc::new(FakeSink::default()));

        c.ensure_loaded().await.unwrap();
        c.ensure_loaded().await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(c.is_loaded().await);
    }

    #[tokio::test]
    async fn test_loaded_but_empty_is_not_unloaded() {
        let c = cache(Arc::new(FakeSource::new(&[], &[])), Arc::new(FakeSink::default()));
        c.ensure_loaded().await.unwrap();
        let lists = c.snapshot().await.unwrap();
        assert_eq!(lists.classify("anything"), Verdict::Clean);
    }

    #[tokio::test]
    async fn test_one_failed_fetch_leaves_both_unloaded() {
        let source = Arc::new(FakeSource::new(&["spam"], &[]));
        source.fail_ad.store(true, Ordering::SeqCst);
        let c = cache(source, Arc::new(FakeSink::default()));

        let err = c.ensure_loaded().await.unwrap_err();
        assert!(matches!(err, RelayError::SourceUnavailable(_)));
        assert!(!c.is_loaded().await);
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_source_unavailable() {
        let c = cache(
            Arc::new(FakeSource::new(&[], &["(unclosed"])),
            Arc::new(FakeSink::default()),
        );
        assert!(matches!(
            c.ensure_loaded().await,
            Err(RelayError::SourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_lists() {
        let source = Arc::new(FakeSource::new(&["spam"], &[]));
        let c = cache(source.clone(), Arc::new(FakeSink::default()));
        c.ensure_loaded().await.unwrap();

        source.fail_ad.store(true, Ordering::SeqCst);
        assert!(c.reload().await.is_err());
        assert_eq!(c.snapshot().await.unwrap().classify("spam"), Verdict::BadWord);
    }

    #[tokio::test]
    async fn test_invalidate_returns_to_unloaded() {
        let c = cache(Arc::new(FakeSource::new(&[], &[])), Arc::new(FakeSink::default()));
        c.ensure_loaded().await.unwrap();
        c.invalidate().await;
        assert!(!c.is_loaded().await);
    }

    #[tokio::test]
    async fn test_add_word_persists_both_lists() {
        let sink = Arc::new(FakeSink::default());
        let c = cache(Arc::new(FakeSource::new(&["spam"], &[r"\bscam\b"])), sink.clone());
        c.ensure_loaded().await.unwrap();

        let outcome = c.add_plain_word(WordListKind::Ad, "promo").await.unwrap();
        assert!(matches!(outcome, AddWordOutcome::Persisted));

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].bad_words.plain, vec!["spam"]);
        assert_eq!(written[0].bad_words.regex, vec![r"\bscam\b"]);
        assert_eq!(written[0].ad_words.plain, vec!["promo"]);
    }

    #[tokio::test]
    async fn test_add_word_stays_live_when_persist_fails() {
        let sink = Arc::new(FakeSink::default());
        sink.reject.store(true, Ordering::SeqCst);
        let c = cache(Arc::new(FakeSource::new(&[], &[])), sink);
        c.ensure_loaded().await.unwrap();

        let outcome = c.add_plain_word(WordListKind::Banned, "foo").await.unwrap();
        assert!(matches!(
            outcome,
            AddWordOutcome::PersistFailed(RelayError::PersistConflict(_))
        ));
        assert_eq!(c.snapshot().await.unwrap().classify("a foo b"), Verdict::BadWord);
    }

    #[tokio::test]
    async fn test_add_existing_word_is_no_op() {
        let sink = Arc::new(FakeSink::default());
        let c = cache(Arc::new(FakeSource::new(&["spam"], &[])), sink.clone());
        c.ensure_loaded().await.unwrap();

        let outcome = c.add_plain_word(WordListKind::Banned, "spam").await.unwrap();
        assert!(matches!(outcome, AddWordOutcome::AlreadyPresent));
        assert!(sink.written.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_adds_persist_in_order() {
        let sink = Arc::new(FakeSink::default());
        sink.slow_first_write.store(true, Ordering::SeqCst);
        let c = Arc::new(cache(Arc::new(FakeSource::new(&[], &[])), sink.clone()));
        c.ensure_loaded().await.unwrap();

        let first = {
            let c = c.clone();
            tokio::spawn(async move { c.add_plain_word(WordListKind::Banned, "aaa").await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let second = c.add_plain_word(WordListKind::Banned, "bbb").await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert!(matches!(first, AddWordOutcome::Persisted));
        assert!(matches!(second, AddWordOutcome::Persisted));
        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1].bad_words.plain, vec!["aaa", "bbb"]);
    }

    #[tokio::test]
    async fn test_add_word_requires_loaded_lists() {
        let c = cache(Arc::new(FakeSource::new(&[], &[])), Arc::new(FakeSink::default()));
        assert!(matches!(
            c.add_plain_word(WordListKind::Banned, "foo").await,
            Err(RelayError::SourceUnavailable(_))
        ));
    }
}
