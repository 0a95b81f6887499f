//! Preparation pipeline: merge → clean → (optional) enrichment →
//! persist.

pub mod orchestrator;
pub mod prepare;

pub use orchestrator::Pipeline;
pub use prepare::{assisted_prepare, manual_prepare};

/// Logical object names in the shared store.
pub const SRC_FINAL: &str = "final_emotion_ensemble.csv";
pub const SRC_MAIN: &str = "main.csv";
pub const SRC_REPORTER: &str = "reporter.csv";
pub const DST_MERGED: &str = "merged_data.csv";
pub const DST_OLLAMA: &str = "ollama_prepared.csv";
pub const DST_MANUAL: &str = "manual_prepared.csv";
pub const DST_PREP: &str = "prep.csv";

/// Slot for user-uploaded prepared tables. The upload surface of the
/// dashboard writes it and downstream charts read it; the pipeline never
/// touches it, but names it so every collaborator agrees on the slot.
pub const DST_UPLOAD: &str = "upload_prep.csv";

/// Which preparation pass produced an output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Deterministic pass only, no external calls
    Manual,

    /// Deterministic pass plus model-assisted category columns
    Ollama,
}

impl Variant {
    /// The permanent per-variant store slot.
    pub fn slot(&self) -> &'static str {
        match self {
            Variant::Manual => DST_MANUAL,
            Variant::Ollama => DST_OLLAMA,
        }
    }

    /// Short name for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Manual => "manual",
            Variant::Ollama => "ollama",
        }
    }
}
