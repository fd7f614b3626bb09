//! `/start`: send the remote start-message document in segments.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::notices;
use super::split::split_message;
use crate::core::{Bot, RelayError, Result};
use crate::remote::TextDocument;

pub struct StartFlow {
    bot: Arc<dyn Bot>,
    document: Option<Arc<dyn TextDocument>>,
    max_len: usize,
}

impl StartFlow {
    pub fn new(bot: Arc<dyn Bot>, document: Option<Arc<dyn TextDocument>>, max_len: usize) -> Self {
        Self {
            bot,
            document,
            max_len,
        }
    }

    /// Sends every segment in order. On any failure the chat gets the retry notice; segments
    /// already sent stay sent. Returns the number of segments delivered.
    #[instrument(skip(self))]
    pub async fn run(&self, chat_id: i64) -> Result<usize> {
        match self.send_segments(chat_id).await {
            Ok(sent) => {
                info!(segments = sent, "step: start message sent");
                Ok(sent)
            }
            Err(e) => {
                warn!(error = %e, "Start message failed");
                if let Err(notify_err) = self.bot.send_message(chat_id, notices::START_FAILED).await {
                    warn!(error = %notify_err, "Failed to send start failure notice");
                }
                Err(e)
            }
        }
    }

    async fn send_segments(&self, chat_id: i64) -> Result<usize> {
        let document = self.document.as_ref().ok_or_else(|| {
            RelayError::SourceUnavailable("start message document not configured".to_string())
        })?;
        let text = document.fetch().await?;
        let segments = split_message(&text, self.max_len);
        for segment in &segments {
            self.bot.send_message(chat_id, segment).await?;
        }
        Ok(segments.len())
    }
}
