//! Upstream client for Google's Gemini generateContent API.
//!
//! The relay is transparent: the provider's JSON body is kept as an opaque
//! `serde_json::Value` and handed back to the caller unmodified, with the
//! provider's own status code on failure.

use anyhow::anyhow;
use relay_core::error::AppError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// The provider requires the credential as a query parameter.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, self.config.api_key
        )
    }

    /// Forward a prompt and return the provider's JSON body untouched.
    /// Issues exactly one outbound call; no retries.
    pub async fn generate(&self, prompt: &str) -> Result<Value, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Forwarding prompt to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::UpstreamTimeout(self.config.timeout)
                } else {
                    AppError::InternalError(anyhow!("Gemini request failed: {}", e))
                }
            })?;

        let status = response.status();
        // The deadline can also fire while the body is being read.
        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamTimeout(self.config.timeout)
            } else {
                AppError::InternalError(anyhow!("Failed to parse Gemini response: {}", e))
            }
        })?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Gemini API returned an error");
            return Err(AppError::Upstream { status, body });
        }

        Ok(body)
    }
}

// ============================================================================
// Gemini API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: i64,
}
