//! Webhook router: secret check, update dispatch, registration endpoints, fallback.

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use relay_bot::webhook::{build_webhook_app, WebhookState, SECRET_HEADER};
use tower::util::ServiceExt;

use common::mock_bot::BotCall;
use common::{rig, Rig, ADMIN, GUEST};

const SECRET: &str = "s3cret";
const PATH: &str = "/endpoint";

fn app(rig: &Rig, public_base_url: Option<&str>) -> Router {
    build_webhook_app(WebhookState {
        chain: rig.components.chain.clone(),
        bot: rig.bot.clone(),
        secret: Arc::from(SECRET),
        webhook_path: Arc::from(PATH),
        public_base_url: public_base_url.map(Arc::from),
    })
}

fn sample_update(text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 77,
            "date": 1_700_000_000,
            "text": text,
            "chat": {"id": GUEST, "type": "private", "first_name": "Guest"},
            "from": {"id": GUEST, "is_bot": false, "first_name": "Guest"}
        }
    })
}

async fn post(app: Router, body: String, secret: Option<&str>) -> Result<(StatusCode, String)> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(PATH)
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header(SECRET_HEADER, secret);
    }
    let response = app.oneshot(builder.body(Body::from(body))?).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

async fn get(app: Router, uri: &str, host: Option<&str>) -> Result<(StatusCode, String)> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(host) = host {
        builder = builder.header("host", host);
    }
    let response = app.oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

/// **Test: wrong or missing secret is rejected before any processing.**
#[tokio::test]
async fn test_invalid_secret_is_unauthorized() -> Result<()> {
    let rig = rig();

    let (status, _) = post(app(&rig, None), sample_update("hello").to_string(), Some("wrong")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(app(&rig, None), "not json".to_string(), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(rig.bot.calls().is_empty());
    Ok(())
}

/// **Test: a valid update is acknowledged and forwarded in the background.**
#[tokio::test]
async fn test_valid_update_is_acknowledged_and_relayed() -> Result<()> {
    let rig = rig();

    let (status, body) = post(app(&rig, None), sample_update("hello").to_string(), Some(SECRET)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ok");

    let calls = rig.bot.wait_for_calls(1).await;
    assert_eq!(
        calls[0],
        BotCall::Forward {
            to: ADMIN,
            from: GUEST,
            message_id: 77
        }
    );
    Ok(())
}

/// **Test: an authorized but malformed body is a bad request.**
#[tokio::test]
async fn test_malformed_body_after_auth_is_bad_request() -> Result<()> {
    let rig = rig();

    let (status, _) = post(app(&rig, None), "{\"nope\":".to_string(), Some(SECRET)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

/// **Test: non-message updates are acknowledged and ignored.**
#[tokio::test]
async fn test_non_message_update_is_ignored() -> Result<()> {
    let rig = rig();
    let update = serde_json::json!({
        "update_id": 2,
        "edited_message": {
            "message_id": 77,
            "date": 1_700_000_000,
            "edit_date": 1_700_000_100,
            "text": "edited",
            "chat": {"id": GUEST, "type": "private", "first_name": "Guest"},
            "from": {"id": GUEST, "is_bot": false, "first_name": "Guest"}
        }
    });

    let (status, _) = post(app(&rig, None), update.to_string(), Some(SECRET)).await?;

    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(rig.bot.calls().is_empty());
    Ok(())
}

/// **Test: /registerWebhook uses the Host header and returns the raw result.**
#[tokio::test]
async fn test_register_webhook_from_host() -> Result<()> {
    let rig = rig();

    let (status, body) = get(app(&rig, None), "/registerWebhook", Some("relay.example.com")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"Webhook registered: {"ok":true,"result":true}"#);
    assert_eq!(
        rig.bot.calls(),
        vec![BotCall::SetWebhook {
            url: "https://relay.example.com/endpoint".to_string(),
            secret: SECRET.to_string()
        }]
    );
    Ok(())
}

/// **Test: PUBLIC_BASE_URL takes precedence over Host.**
#[tokio::test]
async fn test_register_webhook_prefers_public_base_url() -> Result<()> {
    let rig = rig();

    get(app(&rig, Some("https://bot.example.org/")), "/registerWebhook", Some("internal:8080")).await?;

    assert!(matches!(
        &rig.bot.calls()[0],
        BotCall::SetWebhook { url, .. } if url == "https://bot.example.org/endpoint"
    ));
    Ok(())
}

#[tokio::test]
async fn test_unregister_webhook() -> Result<()> {
    let rig = rig();

    let (status, body) = get(app(&rig, None), "/unRegisterWebhook", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Webhook unregistered: "));
    assert_eq!(rig.bot.calls(), vec![BotCall::DeleteWebhook]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_falls_back() -> Result<()> {
    let rig = rig();

    let (status, body) = get(app(&rig, None), "/favicon.ico", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "No handler for this request");
    Ok(())
}
