//! HTTP surface: the webhook endpoint and the registration endpoints.

mod app;
mod auth;
mod handler;
mod register;
mod state;

pub use app::{build_webhook_app, REGISTER_PATH, UNREGISTER_PATH};
pub use auth::SECRET_HEADER;
pub use register::webhook_url;
pub use state::WebhookState;
