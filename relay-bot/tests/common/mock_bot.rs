//! Recording implementation of [`relay_bot::Bot`] for integration tests.
//!
//! Every platform call is appended to a log tests assert on. Forward and copy can be switched
//! to fail to exercise the relay's failure paths; sends can fail always or only at the N-th attempt.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use relay_bot::{Bot, RelayError, Result};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send { chat_id: i64, text: String },
    Forward { to: i64, from: i64, message_id: i32 },
    Copy { to: i64, from: i64, message_id: i32 },
    SetWebhook { url: String, secret: String },
    DeleteWebhook,
}

pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    next_id: AtomicI32,
    pub fail_forward: AtomicBool,
    pub fail_copy: AtomicBool,
    pub fail_send: AtomicBool,
    /// 1-based index of the one send attempt that fails; 0 disables.
    pub fail_send_at: AtomicUsize,
    send_attempts: AtomicUsize,
}

impl Default for MockBot {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1000),
            fail_forward: AtomicBool::new(false),
            fail_copy: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            fail_send_at: AtomicUsize::new(0),
            send_attempts: AtomicUsize::new(0),
        }
    }
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send { chat_id: id, text } if id == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn forwards(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BotCall::Forward { .. }))
            .count()
    }

    /// Polls until at least `n` calls were recorded, for work running in spawned tasks.
    pub async fn wait_for_calls(&self, n: usize) -> Vec<BotCall> {
        for _ in 0..100 {
            if self.calls.lock().unwrap().len() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.calls()
    }

    fn record(&self, call: BotCall) -> i32 {
        self.calls.lock().unwrap().push(call);
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32> {
        let attempt = self.send_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_send.load(Ordering::SeqCst) || attempt == self.fail_send_at.load(Ordering::SeqCst) {
            return Err(RelayError::Transport("sendMessage failed".to_string()));
        }
        Ok(self.record(BotCall::Send {
            chat_id,
            text: text.to_string(),
        }))
    }

    async fn forward_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<i32> {
        if self.fail_forward.load(Ordering::SeqCst) {
            return Err(RelayError::Transport("Bad Request: message to forward not found".to_string()));
        }
        Ok(self.record(BotCall::Forward {
            to: to_chat_id,
            from: from_chat_id,
            message_id,
        }))
    }

    async fn copy_message(&self, to_chat_id: i64, from_chat_id: i64, message_id: i32) -> Result<i32> {
        if self.fail_copy.load(Ordering::SeqCst) {
            return Err(RelayError::Transport("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(self.record(BotCall::Copy {
            to: to_chat_id,
            from: from_chat_id,
            message_id,
        }))
    }

    async fn set_webhook(&self, url: &str, secret_token: &str) -> Result<Value> {
        self.record(BotCall::SetWebhook {
            url: url.to_string(),
            secret: secret_token.to_string(),
        });
        Ok(json!({ "ok": true, "result": true }))
    }

    async fn delete_webhook(&self) -> Result<Value> {
        self.record(BotCall::DeleteWebhook);
        Ok(json!({ "ok": true, "result": true }))
    }
}
