//! Data types for the preparation pipeline.

pub mod record;
pub mod table;
pub mod value;
pub mod vocab;

use std::collections::HashMap;

pub use record::{ENRICHED_COLUMNS, ENRICHMENT_VALUE_CAP, RECOGNIZED_FIELDS};
pub use table::{Row, Table};
pub use value::Value;
pub use vocab::{Vocabularies, Vocabulary};

/// Raw value to normalized value, as proposed by the enrichment
/// collaborator. Transient: embedded into derived columns, never
/// persisted on its own.
pub type CategoryMapping = HashMap<String, String>;
