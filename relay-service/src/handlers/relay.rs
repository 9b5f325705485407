use crate::startup::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use relay_core::error::AppError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// POST /api: relay one prompt to the upstream provider and answer with the
/// provider's JSON body, or a `{"error": ...}` body on failure.
pub async fn relay(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    // Parsed by hand rather than via the Json extractor: a malformed body
    // must surface as a 500 carrying the parse error message, not a 400.
    let request: PromptRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

    // Credential presence is checked before any outbound work.
    let gemini = state.gemini.as_ref().ok_or(AppError::MissingApiKey)?;

    let upstream = gemini.generate(&request.prompt).await?;

    Ok((StatusCode::OK, Json(upstream)))
}

/// OPTIONS /api: CORS preflight. The headers themselves are stamped on every
/// response by `relay_core::middleware::cors_middleware`.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
