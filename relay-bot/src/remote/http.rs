//! Shared reqwest helpers. Network failures map to `Transport`; a non-success status or an
//! undecodable body maps to `SourceUnavailable`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::{RelayError, Result};

/// Client used for every remote document call.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("relay-bot/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|e| RelayError::Transport(e.to_string()))
}

async fn get_ok(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RelayError::Transport(format!("GET {url}: {e}")))?;
    let status = response.status();
    debug!(url = %url, status = %status, "remote document fetched");
    if !status.is_success() {
        return Err(RelayError::SourceUnavailable(format!(
            "GET {url} returned {status}"
        )));
    }
    Ok(response)
}

pub(crate) async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    get_ok(client, url)
        .await?
        .text()
        .await
        .map_err(|e| RelayError::Transport(format!("GET {url}: {e}")))
}

pub(crate) async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let body = fetch_text(client, url).await?;
    serde_json::from_str(&body)
        .map_err(|e| RelayError::SourceUnavailable(format!("malformed document at {url}: {e}")))
}
