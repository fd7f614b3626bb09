//! Remote documents: word-list source and persistence sink, fraud registry, plain-text documents.
//!
//! Each collaborator is a trait so the relay can be built against in-process fakes; the
//! `Http*` types are the reqwest-backed production implementations.

mod document;
mod fraud;
mod http;
mod word_source;

pub use document::{HttpTextDocument, TextDocument};
pub use fraud::{FraudRegistry, HttpFraudRegistry};
pub use http::build_http_client;
pub use word_source::{
    HttpWordListSink, HttpWordListSource, UnconfiguredSink, WordListSink, WordListSource,
};

#[cfg(test)]
pub use document::MockTextDocument;
#[cfg(test)]
pub use fraud::MockFraudRegistry;
