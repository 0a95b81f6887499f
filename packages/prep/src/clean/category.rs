//! Category normalization against a fixed vocabulary.

use crate::types::{Value, Vocabulary};

/// Normalize a raw category term.
///
/// The term is trimmed and lower-cased for lookup. A miss returns the
/// original raw value unchanged: the fallback is explicit, so the
/// output vocabulary stays open rather than closed.
pub fn normalize(raw: &str, vocabulary: &Vocabulary) -> String {
    let needle = raw.trim().to_lowercase();
    match vocabulary.get(&needle) {
        Some(canonical) => canonical.to_string(),
        None => raw.to_string(),
    }
}

/// Normalize a cell. Null passes through as null; text cells are
/// normalized in place, anything else is rendered to text first.
pub fn normalize_value(raw: &Value, vocabulary: &Vocabulary) -> Value {
    if raw.is_null() {
        return Value::Null;
    }
    match raw.as_str() {
        Some(text) => Value::Str(normalize(text, vocabulary)),
        None => Value::Str(normalize(&raw.render(), vocabulary)),
    }
}
