//! Shared-secret gate on every route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-API-Key` header is absent or differs from the
/// configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided != Some(state.config.api_key.as_str()) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request with {} API key",
            if provided.is_some() { "an invalid" } else { "no" }
        );
        return Err(ApiError::Unauthorized("Invalid API Key".to_string()));
    }

    Ok(next.run(request).await)
}
