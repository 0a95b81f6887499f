//! Storage trait for flat-table artifacts.
//!
//! The real store is collaborator-owned object storage; the pipeline
//! only needs named load/store of CSV-shaped tables. Implementations
//! translate "object missing" into an empty table, so absence of a
//! source is never an error. Persistence failures do propagate:
//! downstream stages depend on persisted state existing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Table;

/// Named table storage.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Load a table by logical name. A missing object yields an empty
    /// table, not an error.
    async fn load(&self, name: &str) -> Result<Table>;

    /// Persist a table under a logical name, overwriting any previous
    /// version.
    async fn store(&self, name: &str, table: &Table) -> Result<()>;
}
