use axum::http::{HeaderMap, StatusCode};

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Missing or mismatched secret header is rejected before the body is looked at.
pub(super) fn validate_secret_token(
    headers: &HeaderMap,
    expected: &str,
) -> Result<(), (StatusCode, String)> {
    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !expected.is_empty() && provided == expected {
        Ok(())
    } else {
        tracing::warn!("Unauthorized webhook request");
        Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}
