//! Process entry points: serve the webhook, or register/unregister it with the platform.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::components::{build_relay_components, create_kv_store, Collaborators};
use crate::config::{BaseConfig, BotConfig};
use crate::core::{init_tracing, Bot};
use crate::remote::build_http_client;
use crate::telegram::TelegramBotAdapter;
use crate::webhook::{build_webhook_app, webhook_url, WebhookState};

/// Creates the log file's directory and installs the subscriber.
pub fn prepare_logging(log_file: &str) -> Result<()> {
    if let Some(dir) = Path::new(log_file).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    init_tracing(log_file)
}

fn platform_bot(base: &BaseConfig) -> Result<Arc<dyn Bot>> {
    let adapter = TelegramBotAdapter::from_token(&base.bot_token, base.telegram_api_url.as_deref())?;
    Ok(Arc::new(adapter))
}

/// Builds all components and serves the webhook until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_server(config: BotConfig) -> Result<()> {
    config.validate()?;
    prepare_logging(config.log_file())?;

    info!(
        store_type = %config.base.store_type,
        listen_addr = %config.base.listen_addr,
        webhook_path = %config.base.webhook_path,
        "Initializing relay bot"
    );

    let bot = platform_bot(&config.base)?;
    let kv = create_kv_store(&config.base).await?;
    let collaborators = Collaborators::http(&config.relay.sources, build_http_client()?);
    let components = build_relay_components(&config.relay, bot.clone(), kv, collaborators);

    let state = WebhookState {
        chain: components.chain.clone(),
        bot,
        secret: config.base.webhook_secret.as_str().into(),
        webhook_path: config.base.webhook_path.as_str().into(),
        public_base_url: config.base.public_base_url.as_deref().map(Into::into),
    };
    let app = build_webhook_app(state);

    let listener = TcpListener::bind(config.base.listen_addr).await?;
    info!(addr = %config.base.listen_addr, "Relay bot listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay bot stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. If the listener cannot be installed the server keeps running.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        error!(error = %e, "Failed to listen for shutdown signal, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Points the platform webhook at `<base_url><WEBHOOK_PATH>`. `base_url` defaults to
/// PUBLIC_BASE_URL.
pub async fn register_webhook(base: &BaseConfig, base_url: Option<String>) -> Result<Value> {
    base.validate()?;
    let base_url = base_url
        .or_else(|| base.public_base_url.clone())
        .ok_or_else(|| anyhow::anyhow!("No public URL: pass --url or set PUBLIC_BASE_URL"))?;
    let url = webhook_url(&base_url, &base.webhook_path);
    let result = platform_bot(base)?
        .set_webhook(&url, &base.webhook_secret)
        .await?;
    info!(url = %url, result = %result, "Webhook registered");
    Ok(result)
}

pub async fn unregister_webhook(base: &BaseConfig) -> Result<Value> {
    base.validate()?;
    let result = platform_bot(base)?.delete_webhook().await?;
    info!(result = %result, "Webhook unregistered");
    Ok(result)
}
