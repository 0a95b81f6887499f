//! Local-directory storage: one CSV file per logical object name.
//!
//! Stands in for the collaborator-owned object store. A missing file
//! reads as an empty table; write failures propagate.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::traits::store::TableStore;
use crate::types::Table;

/// Table storage backed by a directory of CSV files.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store rooted at the given directory. The directory is
    /// created on first write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl TableStore for DirStore {
    async fn load(&self, name: &str) -> Result<Table> {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Table::from_csv(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(name, "object not found, loading empty table");
                Ok(Table::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, name: &str, table: &Table) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let bytes = table.to_csv()?;
        tokio::fs::write(self.path_for(name), bytes).await?;
        Ok(())
    }
}
