//! Ollama-backed category enricher.
//!
//! Wraps the pure `ollama-client` behind the [`CategoryEnricher`]
//! trait. Retries with a fixed delay live here, at the collaborator
//! boundary; the pipeline only ever sees a mapping or an empty one.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use ollama_client::OllamaClient;

use crate::enrich::{build_mapping_prompt, parse_mapping_response};
use crate::traits::enricher::CategoryEnricher;
use crate::types::CategoryMapping;

/// Category enricher backed by a local Ollama server.
pub struct OllamaEnricher {
    client: OllamaClient,
    max_attempts: u32,
    retry_delay: Duration,
}

impl OllamaEnricher {
    /// Wrap a configured client with default retry policy.
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Create from `OLLAMA_BASE_URL` / `OLLAMA_MODEL` environment
    /// variables.
    pub fn from_env() -> Self {
        Self::new(OllamaClient::from_env())
    }

    /// Override the bounded attempt count.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Override the fixed inter-attempt delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

#[async_trait]
impl CategoryEnricher for OllamaEnricher {
    async fn enrich(&self, column: &str, values: &[String]) -> CategoryMapping {
        if values.is_empty() {
            return CategoryMapping::new();
        }
        let prompt = build_mapping_prompt(column, values);

        for attempt in 1..=self.max_attempts {
            match self.client.generate(&prompt).await {
                Ok(response) => {
                    let mapping = parse_mapping_response(&response.text);
                    if !mapping.is_empty() {
                        debug!(column, entries = mapping.len(), "enrichment mapping received");
                        return mapping;
                    }
                    warn!(column, attempt, "enrichment response had no usable mapping");
                }
                Err(e) => {
                    warn!(column, attempt, error = %e, "enrichment call failed");
                }
            }
            if attempt < self.max_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        CategoryMapping::new()
    }
}
