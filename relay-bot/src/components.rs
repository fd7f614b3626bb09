//! Component factory: builds the store, remote collaborators, relay engine and handler chain
//! from config. Isolates assembly from the runner so tests can inject a mock bot and fakes.

use std::sync::Arc;

use anyhow::Result;
use storage::{InMemoryKvStore, KvStore, RelayStore, SqliteKvStore};
use tracing::{error, info, instrument};

use crate::advisory::{Advisory, NotificationThrottle, Notifier};
use crate::admin::AdminInterpreter;
use crate::chain::HandlerChain;
use crate::config::{BaseConfig, RelayConfig, RemoteSources, StoreType};
use crate::core::Bot;
use crate::filter::{ContentFilter, WordListCache};
use crate::handlers::LoggingHandler;
use crate::relay::{ChatLocks, RelayEngine, StartFlow};
use crate::remote::{
    FraudRegistry, HttpFraudRegistry, HttpTextDocument, HttpWordListSink, HttpWordListSource,
    TextDocument, UnconfiguredSink, WordListSink, WordListSource,
};

/// Remote documents the relay depends on.
pub struct Collaborators {
    pub word_source: Arc<dyn WordListSource>,
    pub word_sink: Arc<dyn WordListSink>,
    pub fraud: Option<Arc<dyn FraudRegistry>>,
    pub start_document: Option<Arc<dyn TextDocument>>,
    pub notification_text: Option<Arc<dyn TextDocument>>,
}

impl Collaborators {
    /// reqwest-backed collaborators for the configured URLs.
    pub fn http(sources: &RemoteSources, client: reqwest::Client) -> Self {
        let word_sink: Arc<dyn WordListSink> = match &sources.persist_url {
            Some(url) => Arc::new(HttpWordListSink::new(
                client.clone(),
                url.clone(),
                sources.persist_token.clone(),
            )),
            None => Arc::new(UnconfiguredSink),
        };
        let text = |url: &Option<String>| {
            url.as_ref().map(|u| {
                Arc::new(HttpTextDocument::new(client.clone(), u.clone())) as Arc<dyn TextDocument>
            })
        };

        Self {
            word_source: Arc::new(HttpWordListSource::new(
                client.clone(),
                sources.bad_words_url.clone(),
                sources.ad_words_url.clone(),
            )),
            word_sink,
            fraud: sources.fraud_db_url.as_ref().map(|u| {
                Arc::new(HttpFraudRegistry::new(client.clone(), u.clone())) as Arc<dyn FraudRegistry>
            }),
            start_document: text(&sources.start_msg_url),
            notification_text: text(&sources.notification_url),
        }
    }
}

/// Everything the webhook needs, plus handles tests inspect.
#[derive(Clone)]
pub struct RelayComponents {
    pub bot: Arc<dyn Bot>,
    pub store: RelayStore,
    pub word_lists: Arc<WordListCache>,
    pub engine: Arc<RelayEngine>,
    pub chain: HandlerChain,
}

/// Opens the configured key-value store.
#[instrument(skip(config))]
pub async fn create_kv_store(config: &BaseConfig) -> Result<Arc<dyn KvStore>> {
    match config.store_type {
        StoreType::Sqlite => {
            info!(database_url = %config.database_url, "Using SQLite relay store");
            let store = SqliteKvStore::new(&config.database_url).await.map_err(|e| {
                error!(error = %e, database_url = %config.database_url, "Failed to open relay store");
                anyhow::anyhow!("Failed to open relay store: {}", e)
            })?;
            Ok(Arc::new(store))
        }
        StoreType::Memory => {
            info!("Using in-memory relay store");
            Ok(Arc::new(InMemoryKvStore::new()))
        }
    }
}

pub fn build_relay_components(
    config: &RelayConfig,
    bot: Arc<dyn Bot>,
    kv: Arc<dyn KvStore>,
    collaborators: Collaborators,
) -> RelayComponents {
    let store = RelayStore::new(kv);
    let locks = ChatLocks::new();
    let word_lists = Arc::new(WordListCache::new(
        collaborators.word_source,
        collaborators.word_sink,
    ));

    let notifier = config.notifications.enabled.then(|| Notifier {
        throttle: NotificationThrottle::new(
            store.notifications.clone(),
            config.notifications.interval,
            locks.clone(),
        ),
        text: collaborators.notification_text,
    });

    let engine = Arc::new(RelayEngine::new(
        bot.clone(),
        store.clone(),
        ContentFilter::new(word_lists.clone()),
        AdminInterpreter::new(
            bot.clone(),
            store.clone(),
            word_lists.clone(),
            locks.clone(),
            config.admin_uid,
        ),
        Advisory::new(bot.clone(), config.admin_uid, collaborators.fraud, notifier),
        StartFlow::new(
            bot.clone(),
            collaborators.start_document,
            config.max_message_length,
        ),
        locks,
        config.admin_uid,
        config.filter_fail_open,
    ));

    let chain = build_handler_chain(engine.clone());
    info!(
        admin_uid = config.admin_uid,
        notifications = config.notifications.enabled,
        filter_fail_open = config.filter_fail_open,
        "Relay components built"
    );

    RelayComponents {
        bot,
        store,
        word_lists,
        engine,
        chain,
    }
}

/// Logging first, relay engine last.
pub fn build_handler_chain(engine: Arc<RelayEngine>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(engine)
}
