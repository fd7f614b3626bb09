//! Content filtering: banned and advertising word lists, their process-wide cache, and the classifier.

mod cache;
mod classify;
mod word_list;

pub use cache::{AddWordOutcome, WordListCache};
pub use classify::{ContentFilter, Verdict};
pub use word_list::{KeywordDatabase, WordListDocument, WordListKind, WordLists, WordSet};
