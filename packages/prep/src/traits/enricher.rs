//! Enrichment collaborator trait.
//!
//! The collaborator proposes raw→normalized mappings for a category
//! column. From the pipeline's perspective the call is infallible:
//! network errors, malformed JSON, and timeouts all surface as an
//! empty mapping, which degrades enrichment to a passthrough.

use async_trait::async_trait;

use crate::types::CategoryMapping;

/// Proposes normalized categories for raw column values.
#[async_trait]
pub trait CategoryEnricher: Send + Sync {
    /// Map up to the capped set of distinct raw values for one column.
    ///
    /// Returns an empty mapping on any failure. Keys absent from the
    /// mapping fall back to the original value at application time, so
    /// partial mappings are fine.
    async fn enrich(&self, column: &str, values: &[String]) -> CategoryMapping;
}

/// Enricher that never proposes anything; the assisted variant then
/// copies raw columns unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait]
impl CategoryEnricher for NoopEnricher {
    async fn enrich(&self, _column: &str, _values: &[String]) -> CategoryMapping {
        CategoryMapping::new()
    }
}
