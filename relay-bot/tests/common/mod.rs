//! Shared setup for relay-bot integration tests.
#![allow(dead_code)]

pub mod fakes;
pub mod mock_bot;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use relay_bot::config::{NotificationSettings, RelayConfig, RemoteSources};
use relay_bot::filter::WordListDocument;
use relay_bot::{build_relay_components, Chat, Collaborators, Message, RelayComponents, User};
use storage::InMemoryKvStore;

use fakes::{RecordingSink, StaticFraud, StaticText, StaticWordSource};
use mock_bot::MockBot;

pub const ADMIN: i64 = 1000;
pub const GUEST: i64 = 42;

pub fn relay_config() -> RelayConfig {
    RelayConfig {
        admin_uid: ADMIN,
        sources: RemoteSources {
            bad_words_url: "http://words.test/bad.json".to_string(),
            ad_words_url: "http://words.test/ad.json".to_string(),
            persist_url: None,
            persist_token: String::new(),
            fraud_db_url: None,
            start_msg_url: None,
            notification_url: None,
        },
        notifications: NotificationSettings {
            enabled: false,
            interval: Duration::from_secs(3600),
        },
        filter_fail_open: false,
        max_message_length: 4096,
    }
}

/// Test rig: components over an in-memory store plus handles to every fake.
pub struct Rig {
    pub components: RelayComponents,
    pub bot: Arc<MockBot>,
    pub kv: InMemoryKvStore,
    pub source: Arc<StaticWordSource>,
    pub sink: Arc<RecordingSink>,
}

pub struct RigOptions {
    pub config: RelayConfig,
    pub banned: WordListDocument,
    pub ad: WordListDocument,
    pub fraud: Vec<i64>,
    pub start_text: Option<String>,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            config: relay_config(),
            banned: fakes::doc(&["spam"], &[]),
            ad: fakes::doc(&["promo"], &[r"t\.me/\w+"]),
            fraud: Vec::new(),
            start_text: Some("Welcome!".to_string()),
        }
    }
}

pub fn rig() -> Rig {
    rig_with(RigOptions::default())
}

pub fn rig_with(options: RigOptions) -> Rig {
    let bot = Arc::new(MockBot::new());
    let kv = InMemoryKvStore::new();
    let source = Arc::new(StaticWordSource::new(options.banned, options.ad));
    let sink = Arc::new(RecordingSink::default());

    let collaborators = Collaborators {
        word_source: source.clone(),
        word_sink: sink.clone(),
        fraud: Some(Arc::new(StaticFraud(options.fraud))),
        start_document: Some(Arc::new(StaticText(options.start_text))),
        notification_text: Some(Arc::new(StaticText(Some("new guest message".to_string())))),
    };
    let components =
        build_relay_components(&options.config, bot.clone(), Arc::new(kv.clone()), collaborators);

    Rig {
        components,
        bot,
        kv,
        source,
        sink,
    }
}

pub fn message(chat_id: i64, id: i32, text: &str, reply_to: Option<i32>) -> Message {
    Message {
        id,
        user: User {
            id: chat_id,
            username: Some(format!("user{chat_id}")),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
        reply_to_message_id: reply_to,
    }
}

pub fn guest(id: i32, text: &str) -> Message {
    message(GUEST, id, text, None)
}

pub fn admin(id: i32, text: &str, reply_to: Option<i32>) -> Message {
    message(ADMIN, id, text, reply_to)
}
