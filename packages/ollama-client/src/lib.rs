//! Pure Ollama REST API client
//!
//! A clean, minimal client for a locally hosted Ollama server with no
//! domain-specific logic. Supports non-streaming text generation against
//! `/api/generate`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_client::OllamaClient;
//!
//! let client = OllamaClient::from_env();
//!
//! let response = client.generate("Summarize this table in one line").await?;
//! println!("{}", response.text);
//! ```

pub mod error;
pub mod types;

pub use error::{OllamaError, Result};
pub use types::{GenerateRequest, GenerateResponse};

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default server address when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Default model when nothing is configured.
pub const DEFAULT_MODEL: &str = "bakllava:7b";

/// Default request timeout. Local models can be slow to first token.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Pure Ollama API client.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client against the given base URL and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url,
            model: model.into(),
        }
    }

    /// Create from `OLLAMA_BASE_URL` and `OLLAMA_MODEL` environment
    /// variables, falling back to the local-server defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(base_url, model)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_client = Client::builder().timeout(timeout).build().unwrap_or_default();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a completion for a prompt with the configured model.
    pub async fn generate(&self, prompt: impl Into<String>) -> Result<GenerateResponse> {
        self.generate_request(GenerateRequest::new(&self.model, prompt))
            .await
    }

    /// Generate a completion for a fully specified request.
    pub async fn generate_request(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Ollama request failed");
                OllamaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Ollama API error");
            return Err(OllamaError::Api(format!("Ollama API error: {}", error_text)));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        debug!(
            model = %raw.model,
            duration_ms = start.elapsed().as_millis(),
            eval_count = ?raw.eval_count,
            "Ollama generation"
        );

        Ok(GenerateResponse {
            text: raw.response.trim().to_string(),
            model: raw.model,
            eval_count: raw.eval_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.1:8b");

        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model, "llama3.1:8b");
    }

    #[test]
    fn test_generate_request_serializes_without_images() {
        let request = GenerateRequest::new("llama3.1:8b", "hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama3.1:8b");
        assert_eq!(json["stream"], false);
        assert!(json.get("images").is_none());
    }
}
