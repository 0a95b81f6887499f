//! Incident-Report Preparation Library
//!
//! Merges three heterogeneous incident-report tables into one wide
//! table, normalizes dates, ages, severities and emotions, derives
//! recurrence and resolution-time metrics, and optionally enriches
//! category columns through a language-model collaborator.
//!
//! # Design Philosophy
//!
//! **Best-effort, never brittle**
//!
//! - Bad data resolves to null or zero sentinels, never errors
//! - Missing sources and columns are synthesized, not rejected
//! - Enrichment degrades to a passthrough when the model fails
//! - Only the backing store can fail a run
//!
//! # Usage
//!
//! ```rust,ignore
//! use prep::{Pipeline, Variant};
//! use prep::stores::DirStore;
//! use prep::traits::NoopEnricher;
//!
//! let pipeline = Pipeline::new(DirStore::new("./data"), NoopEnricher);
//! let prepared = pipeline.run(Variant::Manual).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (TableStore, CategoryEnricher)
//! - [`types`] - Table, cell values, vocabularies
//! - [`merge`] - Three-source merge with best-available-key joins
//! - [`clean`] - Date, category, and metric normalization
//! - [`pipeline`] - Preparation passes and orchestration
//! - [`stores`] - Storage implementations (MemoryStore, DirStore)
//! - [`enrich`] - Enrichment prompt and response contract
//! - [`testing`] - Mock implementations for testing

pub mod clean;
pub mod enrich;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "ollama")]
pub mod ai;

// Re-export core types at crate root
pub use error::{PrepError, Result};
pub use traits::{enricher::CategoryEnricher, enricher::NoopEnricher, store::TableStore};
pub use types::{
    CategoryMapping, Row, Table, Value, Vocabularies, Vocabulary, ENRICHED_COLUMNS,
    ENRICHMENT_VALUE_CAP, RECOGNIZED_FIELDS,
};

// Re-export the pipeline entry points
pub use pipeline::{
    assisted_prepare, manual_prepare, Pipeline, Variant, DST_MANUAL, DST_MERGED, DST_OLLAMA,
    DST_PREP, DST_UPLOAD, SRC_FINAL, SRC_MAIN, SRC_REPORTER,
};

// Re-export merge
pub use merge::{canonicalize_columns, has_recognized_fields, merge_sources};

// Re-export stores
pub use stores::{DirStore, MemoryStore};

// Re-export testing utilities
pub use testing::{EnrichCall, FailingStore, MockEnricher};

#[cfg(feature = "ollama")]
pub use ai::OllamaEnricher;
