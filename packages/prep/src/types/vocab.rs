//! Fixed normalization vocabularies.
//!
//! A vocabulary maps lower-cased raw terms to canonical display terms.
//! The built-in severity and emotion tables ship here, but callers pass
//! vocabularies into the normalizer explicitly so tests can inject
//! alternates.

use std::collections::HashMap;

/// Case-insensitive raw-term to canonical-term lookup.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: HashMap<String, String>,
}

impl Vocabulary {
    /// Build from raw/canonical pairs. Raw terms are lower-cased on the
    /// way in.
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            terms: pairs
                .into_iter()
                .map(|(raw, canonical)| (raw.to_lowercase(), canonical.to_string()))
                .collect(),
        }
    }

    /// Look up an already trimmed, lower-cased term.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Built-in severity vocabulary.
    pub fn severity() -> Self {
        Self::new([
            ("low", "Low"),
            ("medium", "Medium"),
            ("med", "Medium"),
            ("moderate", "Medium"),
            ("high", "High"),
            ("critical", "Critical"),
            ("crit", "Critical"),
        ])
    }

    /// Built-in emotion vocabulary.
    pub fn emotion() -> Self {
        Self::new([
            ("joy", "Happy"),
            ("happiness", "Happy"),
            ("sadness", "Sad"),
            ("anger", "Anger"),
            ("fear", "Fear"),
            ("neutral", "Neutral"),
            ("calm", "Calm"),
            ("surprise", "Surprised"),
            ("disgust", "Disgust"),
        ])
    }
}

/// The vocabulary set a preparation run normalizes with.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    /// Raw severity terms to canonical severities
    pub severity: Vocabulary,

    /// Raw emotion terms to canonical emotions
    pub emotion: Vocabulary,
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self {
            severity: Vocabulary::severity(),
            emotion: Vocabulary::emotion(),
        }
    }
}
