use axum::{
    routing::{get, post},
    Router,
};

use super::handler::webhook_handler;
use super::register::{register_handler, unregister_handler};
use super::state::WebhookState;

pub const REGISTER_PATH: &str = "/registerWebhook";
pub const UNREGISTER_PATH: &str = "/unRegisterWebhook";

/// Webhook route at `state.webhook_path`, the two registration routes, and a plain-text
/// fallback for everything else.
pub fn build_webhook_app(state: WebhookState) -> Router {
    let path = state.webhook_path.to_string();
    Router::new()
        .route(&path, post(webhook_handler))
        .route(REGISTER_PATH, get(register_handler))
        .route(UNREGISTER_PATH, get(unregister_handler))
        .fallback(|| async { "No handler for this request" })
        .with_state(state)
}
