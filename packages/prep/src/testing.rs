//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the preparation
//! library without making real model or network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{PrepError, Result};
use crate::traits::enricher::CategoryEnricher;
use crate::traits::store::TableStore;
use crate::types::{CategoryMapping, Table};

/// A mock enricher with canned mappings and call tracking.
#[derive(Default)]
pub struct MockEnricher {
    /// Predefined mappings by column name
    mappings: Arc<RwLock<HashMap<String, CategoryMapping>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<EnrichCall>>>,
}

/// Record of a call made to the mock enricher.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichCall {
    /// Column the mapping was requested for
    pub column: String,

    /// Values sent for that column, in request order
    pub values: Vec<String>,
}

impl MockEnricher {
    /// Create a mock that answers every column with an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned mapping for a column.
    pub fn with_mapping(self, column: impl Into<String>, mapping: CategoryMapping) -> Self {
        self.mappings.write().unwrap().insert(column.into(), mapping);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<EnrichCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl CategoryEnricher for MockEnricher {
    async fn enrich(&self, column: &str, values: &[String]) -> CategoryMapping {
        self.calls.write().unwrap().push(EnrichCall {
            column: column.to_string(),
            values: values.to_vec(),
        });
        self.mappings
            .read()
            .unwrap()
            .get(column)
            .cloned()
            .unwrap_or_default()
    }
}

/// A store whose writes always fail, for persistence-error tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

#[async_trait]
impl TableStore for FailingStore {
    async fn load(&self, _name: &str) -> Result<Table> {
        Ok(Table::new())
    }

    async fn store(&self, name: &str, _table: &Table) -> Result<()> {
        Err(PrepError::Storage(
            format!("store unavailable for {name}").into(),
        ))
    }
}
