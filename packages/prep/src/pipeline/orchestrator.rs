//! The Pipeline - main entry point for the preparation library.
//!
//! Sequences merge → clean → (optional) enrichment → persist. The only
//! durable states are the explicit persists; a failed run restarts from
//! the source tables. Concurrent runs are last-writer-wins on the
//! shared output slots, which is accepted for a single-analyst tool.

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::merge::merge_sources;
use crate::pipeline::{
    assisted_prepare, manual_prepare, Variant, DST_MERGED, DST_PREP, SRC_FINAL, SRC_MAIN,
    SRC_REPORTER,
};
use crate::traits::{CategoryEnricher, TableStore};
use crate::types::{Table, Vocabularies};

/// The preparation pipeline over a store and an enrichment
/// collaborator.
///
/// # Example
///
/// ```rust,ignore
/// use prep::{Pipeline, Variant};
/// use prep::stores::MemoryStore;
/// use prep::traits::NoopEnricher;
///
/// let pipeline = Pipeline::new(MemoryStore::new(), NoopEnricher);
/// let prepared = pipeline.run(Variant::Manual).await?;
/// ```
pub struct Pipeline<S: TableStore, E: CategoryEnricher> {
    store: S,
    enricher: E,
    vocabularies: Vocabularies,
}

impl<S: TableStore, E: CategoryEnricher> Pipeline<S, E> {
    /// Create a pipeline with the built-in vocabularies.
    pub fn new(store: S, enricher: E) -> Self {
        Self {
            store,
            enricher,
            vocabularies: Vocabularies::default(),
        }
    }

    /// Replace the normalization vocabularies.
    pub fn with_vocabularies(mut self, vocabularies: Vocabularies) -> Self {
        self.vocabularies = vocabularies;
        self
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the enrichment collaborator.
    pub fn enricher(&self) -> &E {
        &self.enricher
    }

    /// Load the three sources, merge them, and persist the merged
    /// table under its well-known name.
    ///
    /// Missing sources load as empty tables and degrade the join; only
    /// store failures are errors.
    pub async fn merge(&self) -> Result<Table> {
        let final_emotion = self.store.load(SRC_FINAL).await?;
        let main = self.store.load(SRC_MAIN).await?;
        let reporter = self.store.load(SRC_REPORTER).await?;

        let merged = merge_sources(final_emotion, main, reporter);
        self.store.store(DST_MERGED, &merged).await?;
        info!(rows = merged.len(), "merged table persisted");
        Ok(merged)
    }

    /// Run the chosen preparation pass over a merged table.
    pub async fn prepare(&self, merged: &Table, variant: Variant) -> Table {
        let now = Utc::now().naive_utc();
        match variant {
            Variant::Manual => manual_prepare(merged, &self.vocabularies, now),
            Variant::Ollama => {
                assisted_prepare(merged, &self.vocabularies, now, &self.enricher).await
            }
        }
    }

    /// Persist a prepared table to its per-variant slot and to the
    /// "current prepared" slot downstream stages read.
    ///
    /// Returns the per-variant object name. Switching variants later is
    /// a single write of the current slot, not a recomputation.
    pub async fn write_prepared(&self, table: &Table, variant: Variant) -> Result<&'static str> {
        self.store.store(variant.slot(), table).await?;
        self.store.store(DST_PREP, table).await?;
        info!(variant = variant.as_str(), slot = variant.slot(), "prepared table persisted");
        Ok(variant.slot())
    }

    /// Full run: merge → prepare → persist. Returns the prepared table.
    pub async fn run(&self, variant: Variant) -> Result<Table> {
        let merged = self.merge().await?;
        let prepared = self.prepare(&merged, variant).await;
        self.write_prepared(&prepared, variant).await?;
        Ok(prepared)
    }
}
