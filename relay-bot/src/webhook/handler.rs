use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, error, info};

use super::auth::validate_secret_token;
use super::state::WebhookState;
use crate::core::ToCoreMessage;
use crate::telegram::TelegramMessageWrapper;

/// Acknowledges the update immediately; the handler chain runs in a detached task so it
/// completes even if the platform connection goes away.
pub(super) async fn webhook_handler(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, (StatusCode, String)> {
    validate_secret_token(&headers, &state.secret)?;

    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Webhook body is not a valid update");
        (StatusCode::BAD_REQUEST, format!("Invalid update: {e}"))
    })?;
    info!(update_id = update.id.0, "Webhook received update");

    match &update.kind {
        UpdateKind::Message(msg) => {
            let message = TelegramMessageWrapper(msg).to_core();
            let chain = state.chain.clone();
            tokio::spawn(async move {
                if let Err(e) = chain.handle(&message).await {
                    error!(
                        error = %e,
                        chat_id = message.chat.id,
                        message_id = message.id,
                        "Handler chain failed"
                    );
                }
            });
        }
        _ => debug!(update_id = update.id.0, "Non-message update ignored"),
    }

    Ok("Ok")
}
