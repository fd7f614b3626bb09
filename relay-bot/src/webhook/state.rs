use std::sync::Arc;

use crate::chain::HandlerChain;
use crate::core::Bot;

/// Shared state for the webhook router.
#[derive(Clone)]
pub struct WebhookState {
    pub chain: HandlerChain,
    pub bot: Arc<dyn Bot>,
    pub secret: Arc<str>,
    /// Route the platform posts updates to, e.g. `/endpoint`.
    pub webhook_path: Arc<str>,
    /// Base URL used for registration; falls back to `https://<Host>` when None.
    pub public_base_url: Option<Arc<str>>,
}
