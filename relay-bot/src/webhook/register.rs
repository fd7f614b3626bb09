use axum::{
    extract::State,
    http::{header::HOST, HeaderMap, StatusCode},
};
use tracing::{error, info};

use super::state::WebhookState;

/// `<base><path>` with exactly one slash between them.
pub fn webhook_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn public_base(state: &WebhookState, headers: &HeaderMap) -> Option<String> {
    if let Some(base) = &state.public_base_url {
        return Some(base.to_string());
    }
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| format!("https://{host}"))
}

pub(super) async fn register_handler(
    State(state): State<WebhookState>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let Some(base) = public_base(&state, &headers) else {
        return (
            StatusCode::BAD_REQUEST,
            "Cannot determine public URL: set PUBLIC_BASE_URL or send a Host header".to_string(),
        );
    };
    let url = webhook_url(&base, &state.webhook_path);
    match state.bot.set_webhook(&url, &state.secret).await {
        Ok(result) => {
            info!(url = %url, "Webhook registration requested");
            (StatusCode::OK, format!("Webhook registered: {result}"))
        }
        Err(e) => {
            error!(error = %e, "Webhook registration failed");
            (StatusCode::BAD_GATEWAY, format!("Webhook registration failed: {e}"))
        }
    }
}

pub(super) async fn unregister_handler(State(state): State<WebhookState>) -> (StatusCode, String) {
    match state.bot.delete_webhook().await {
        Ok(result) => (StatusCode::OK, format!("Webhook unregistered: {result}")),
        Err(e) => {
            error!(error = %e, "Webhook removal failed");
            (StatusCode::BAD_GATEWAY, format!("Webhook removal failed: {e}"))
        }
    }
}
