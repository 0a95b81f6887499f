//! Typed errors for the preparation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Bad data never produces an error: parse failures resolve to null or
//! zero sentinels inside the cleaning passes. Errors here are reserved
//! for the backing store, which downstream stages depend on.

use thiserror::Error;

/// Errors that can occur during preparation operations.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;
