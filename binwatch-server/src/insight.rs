//! Passthrough to the generative-text API used for dashboard insights.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::warn;

use crate::config::ServerConfig;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Errors from an insight backend.
#[derive(thiserror::Error, Debug)]
pub enum InsightError {
    /// No API key was configured.
    #[error("API key not configured")]
    Unconfigured,
    /// The request failed, timed out, or returned something other than JSON.
    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[async_trait]
/// Backend that turns a prompt into a model response.
pub trait InsightPort: Send + Sync {
    /// Send `prompt` upstream and return the response body untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`InsightError`] when unconfigured or when the call fails.
    async fn generate(&self, prompt: &str) -> Result<Value, InsightError>;
}

/// [`InsightPort`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            model,
            timeout,
        }
    }

    /// Create a client from server settings.
    #[must_use]
    pub fn from_config(client: Client, config: &ServerConfig) -> Self {
        Self::new(
            client,
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_timeout,
        )
    }

    /// Whether an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl InsightPort for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::Unconfigured)?;

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        // Upstream error bodies are passed through as-is, so no status check here.
        let response = self
            .client
            .post(format!("{BASE_URL}/{}:generateContent", self.model))
            .query(&[("key", api_key)])
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .inspect_err(|err| warn!(error = %err, "insight request failed"))?;

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let client = GeminiClient::new(
            Client::new(),
            None,
            "test-model".to_owned(),
            Duration::from_secs(1),
        );

        assert!(!client.is_configured());
        let err = client.generate("hello").await.expect_err("no key configured");
        assert!(matches!(err, InsightError::Unconfigured));
    }
}
