//! Word sets: plain substrings plus compiled case-insensitive patterns.
//!
//! The durable form is [`WordListDocument`] (pattern source strings); [`WordSet`] is the
//! in-memory form, rebuilt on every load.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::classify::Verdict;

/// Which of the two lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListKind {
    Banned,
    Ad,
}

impl fmt::Display for WordListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Banned => f.write_str("banned"),
            Self::Ad => f.write_str("ad"),
        }
    }
}

/// Remote shape of one list. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordListDocument {
    #[serde(default)]
    pub plain: Vec<String>,
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Body written to the persistence sink: both lists in one overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDatabase {
    pub bad_words: WordListDocument,
    pub ad_words: WordListDocument,
}

#[derive(Debug, Clone, Default)]
pub struct WordSet {
    plain: Vec<String>,
    regex: Vec<Regex>,
}

impl WordSet {
    /// Compiles every pattern case-insensitively. Fails on the first invalid pattern.
    pub fn compile(doc: &WordListDocument) -> Result<Self, regex::Error> {
        let regex = doc
            .regex
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            plain: doc.plain.clone(),
            regex,
        })
    }

    /// Converts back to the durable form; patterns become their source strings.
    pub fn to_document(&self) -> WordListDocument {
        WordListDocument {
            plain: self.plain.clone(),
            regex: self.regex.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }

    /// Appends a plain word. Returns false if it was already present.
    pub fn add_plain(&mut self, word: &str) -> bool {
        if self.plain.iter().any(|w| w == word) {
            return false;
        }
        self.plain.push(word.to_string());
        true
    }

    /// Case-sensitive containment of any plain word.
    pub fn matches_plain(&self, text: &str) -> bool {
        self.plain.iter().any(|w| !w.is_empty() && text.contains(w.as_str()))
    }

    pub fn matches_regex(&self, text: &str) -> bool {
        self.regex.iter().any(|r| r.is_match(text))
    }

    pub fn plain(&self) -> &[String] {
        &self.plain
    }

    pub fn regex_count(&self) -> usize {
        self.regex.len()
    }
}

/// Both lists, loaded together.
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    pub banned: WordSet,
    pub ad: WordSet,
}

impl WordLists {
    pub fn compile(banned: &WordListDocument, ad: &WordListDocument) -> Result<Self, regex::Error> {
        Ok(Self {
            banned: WordSet::compile(banned)?,
            ad: WordSet::compile(ad)?,
        })
    }

    pub fn get(&self, kind: WordListKind) -> &WordSet {
        match kind {
            WordListKind::Banned => &self.banned,
            WordListKind::Ad => &self.ad,
        }
    }

    pub fn get_mut(&mut self, kind: WordListKind) -> &mut WordSet {
        match kind {
            WordListKind::Banned => &mut self.banned,
            WordListKind::Ad => &mut self.ad,
        }
    }

    /// Plain checks before pattern checks, banned before ad; first match wins.
    pub fn classify(&self, text: &str) -> Verdict {
        if self.banned.matches_plain(text) {
            Verdict::BadWord
        } else if self.ad.matches_plain(text) {
            Verdict::AdWord
        } else if self.banned.matches_regex(text) {
            Verdict::BadWord
        } else if self.ad.matches_regex(text) {
            Verdict::AdWord
        } else {
            Verdict::Clean
        }
    }

    pub fn to_database(&self) -> KeywordDatabase {
        KeywordDatabase {
            bad_words: self.banned.to_document(),
            ad_words: self.ad.to_document(),
        }
    }
}
