//! Ollama API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Generate
// =============================================================================

/// Generation request for `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model to use (e.g., "llama3.1:8b", "bakllava:7b")
    pub model: String,

    /// The prompt to complete
    pub prompt: String,

    /// Stream chunks back (the client always sets this to false)
    pub stream: bool,

    /// Base64-encoded images for multimodal models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl GenerateRequest {
    /// Create a new non-streaming generate request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            images: None,
        }
    }

    /// Attach base64-encoded images.
    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Raw generation response from `/api/generate` (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponseRaw {
    /// Completed text
    #[serde(default)]
    pub response: String,

    /// Whether generation finished
    #[serde(default)]
    pub done: bool,

    /// Model that produced the response
    #[serde(default)]
    pub model: String,

    /// Total wall-clock time in nanoseconds
    #[serde(default)]
    pub total_duration: Option<u64>,

    /// Tokens in the completion
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Cleaned generation response returned to callers.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Completed text, trimmed
    pub text: String,

    /// Model that produced the response
    pub model: String,

    /// Tokens in the completion, when reported
    pub eval_count: Option<u64>,
}
