//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::store::TableStore;
use crate::types::Table;

/// In-memory table storage.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, builder style.
    pub fn with_table(self, name: impl Into<String>, table: Table) -> Self {
        self.tables.write().unwrap().insert(name.into(), table);
        self
    }

    /// Whether an object exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.read().unwrap().contains_key(name)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.tables.read().unwrap().len()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.tables.write().unwrap().clear();
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn load(&self, name: &str) -> Result<Table> {
        Ok(self
            .tables
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    async fn store(&self, name: &str, table: &Table) -> Result<()> {
        self.tables
            .write()
            .unwrap()
            .insert(name.to_string(), table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_object_loads_empty() {
        let store = MemoryStore::new();
        let table = store.load("nope.csv").await.unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let store = MemoryStore::new();
        let first = Table::from_csv(b"a\n1\n").unwrap();
        let second = Table::from_csv(b"a\n2\n").unwrap();

        store.store("t.csv", &first).await.unwrap();
        store.store("t.csv", &second).await.unwrap();

        assert_eq!(store.load("t.csv").await.unwrap(), second);
        assert_eq!(store.object_count(), 1);
    }
}
