use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

/// Error taxonomy for the relay. Every variant terminates at the endpoint
/// boundary as a JSON body; nothing propagates past the HTTP response.
#[derive(Debug, Error)]
pub enum AppError {
    /// The upstream credential was not configured at process start.
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,

    /// The upstream provider answered with a non-success status. The relay
    /// is transparent: status and body are forwarded to the caller verbatim.
    #[error("upstream returned status {status}")]
    Upstream { status: StatusCode, body: Value },

    /// The outbound call exceeded the configured deadline.
    #[error("upstream request timed out after {}s", .0.as_secs())]
    UpstreamTimeout(Duration),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("{0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Error bodies are exactly {"error": <string>}, except the upstream
        // passthrough which relays the provider's body unchanged.
        let (status, body) = match self {
            AppError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "GEMINI_API_KEY not set" }),
            ),
            AppError::Upstream { status, body } => (status, body),
            AppError::UpstreamTimeout(elapsed) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": format!("upstream request timed out after {}s", elapsed.as_secs()) }),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
