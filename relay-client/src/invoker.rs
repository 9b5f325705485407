use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    /// The relay answered with a non-success status. Status code, status
    /// text, and the raw body are embedded for diagnostic display.
    #[error("API {status} {status_text}: {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the relay's `/api` endpoint.
pub struct RelayClient {
    base_url: String,
    http: Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Send one prompt to the relay and resolve with the generated text.
    ///
    /// On success the provider's response is reduced to
    /// `candidates[0].content.parts[0].text`; when that path is absent the
    /// whole JSON body is returned serialized, so the caller always gets a
    /// displayable string.
    pub async fn invoke(&self, prompt: &str) -> Result<String, InvokeError> {
        let response = self
            .http
            .post(format!("{}/api", self.base_url))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Relay call failed");
            return Err(InvokeError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let data: Value = response.json().await?;
        Ok(extract_text(&data))
    }
}

/// Reach into the provider's nested response shape for the generated text,
/// falling back to the serialized body when any link in the path is missing.
pub fn extract_text(data: &Value) -> String {
    data.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_text_from_nested_path() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }]
        });
        assert_eq!(extract_text(&data), "hello");
    }

    #[test]
    fn falls_back_to_serialized_body_when_path_missing() {
        let data = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let text = extract_text(&data);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), data);
    }

    #[test]
    fn falls_back_when_text_is_not_a_string() {
        let data = json!({
            "candidates": [{ "content": { "parts": [{ "text": 42 }] } }]
        });
        let text = extract_text(&data);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), data);
    }
}
