//! Core trait abstractions: storage and enrichment seams.

pub mod enricher;
pub mod store;

pub use enricher::{CategoryEnricher, NoopEnricher};
pub use store::TableStore;
