//! Message classification against the cached word lists.

use std::sync::Arc;

use tracing::{debug, warn};

use super::cache::WordListCache;

/// Classification of one message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    BadWord,
    AdWord,
    /// Lists could not be loaded; callers decide whether to fail open or closed.
    Unloaded,
}

impl Verdict {
    pub fn is_rejected(self) -> bool {
        matches!(self, Verdict::BadWord | Verdict::AdWord)
    }
}

#[derive(Clone)]
pub struct ContentFilter {
    cache: Arc<WordListCache>,
}

impl ContentFilter {
    pub fn new(cache: Arc<WordListCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<WordListCache> {
        &self.cache
    }

    /// Loads the lists on first use, then classifies. Never errors: a failed load is
    /// reported as [`Verdict::Unloaded`].
    pub async fn classify(&self, text: &str) -> Verdict {
        if let Err(e) = self.cache.ensure_loaded().await {
            warn!(error = %e, "Word lists unavailable, message not classified");
            return Verdict::Unloaded;
        }
        let verdict = match self.cache.snapshot().await {
            Some(lists) => lists.classify(text),
            None => Verdict::Unloaded,
        };
        debug!(?verdict, len = text.chars().count(), "Message classified");
        verdict
    }
}
