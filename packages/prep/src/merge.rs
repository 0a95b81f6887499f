//! Merge the three incident sources into one wide table.
//!
//! Merge is a pure function: persistence of the merged table happens in
//! the orchestrator, so this module stays testable without a storage
//! dependency.

use tracing::debug;

use crate::types::{Table, RECOGNIZED_FIELDS};

/// Column-name variants canonicalized before joining. A rename only
/// happens when the canonical name is not already present.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("organisation", "organization"),
    ("organization name", "organization"),
    ("org_name", "organization"),
    ("client", "client_name"),
    ("report_date", "reported_date"),
    ("incident_datetime", "incident_date"),
];

/// Join-key preference for the main source, best keys first.
const MAIN_JOIN_KEYS: &[&str] = &["filename", "client_name", "ndis_id"];

/// Join-key preference for the reporter source.
const REPORTER_JOIN_KEYS: &[&str] = &["reporter", "client_name"];

/// Canonicalize known column-name variants on one source table.
pub fn canonicalize_columns(table: &mut Table) {
    for (alias, canonical) in COLUMN_ALIASES {
        table.rename_column(alias, canonical);
    }
}

/// Merge the three sources into one wide table.
///
/// The emotion-ensemble table is the base; the main and reporter tables
/// left-join onto it sequentially with `_m` and `_r` suffixes for
/// collided non-key columns. A source whose join keys are unavailable
/// contributes no columns, but no base rows are lost. Every recognized
/// field exists on the result, null where no source supplied it.
pub fn merge_sources(mut final_emotion: Table, mut main: Table, mut reporter: Table) -> Table {
    canonicalize_columns(&mut final_emotion);
    canonicalize_columns(&mut main);
    canonicalize_columns(&mut reporter);

    let mut merged = final_emotion;
    merged = join_source(merged, &main, MAIN_JOIN_KEYS, "client_name", "_m");
    merged = join_source(merged, &reporter, REPORTER_JOIN_KEYS, "reporter", "_r");

    for field in RECOGNIZED_FIELDS {
        merged.ensure_column(field);
    }

    debug!(
        rows = merged.len(),
        columns = merged.columns().len(),
        "merged three sources"
    );
    merged
}

/// Left-join one source onto the base with the best available keys.
///
/// Key set = preference list ∩ columns of both sides. Falls back to the
/// single named key, and otherwise skips the source's contribution.
fn join_source(
    base: Table,
    other: &Table,
    preference: &[&str],
    fallback_key: &str,
    suffix: &str,
) -> Table {
    if other.is_empty() {
        return base;
    }

    let keys: Vec<&str> = preference
        .iter()
        .copied()
        .filter(|k| other.has_column(k) && base.has_column(k))
        .collect();

    if !keys.is_empty() {
        debug!(keys = ?keys, suffix, "joining source");
        return base.left_join(other, &keys, suffix);
    }
    if other.has_column(fallback_key) && base.has_column(fallback_key) {
        debug!(key = fallback_key, suffix, "joining source on fallback key");
        return base.left_join(other, &[fallback_key], suffix);
    }

    debug!(suffix, "no usable join key; skipping source columns");
    base
}

/// Whether every recognized field exists on the table.
pub fn has_recognized_fields(table: &Table) -> bool {
    RECOGNIZED_FIELDS.iter().all(|f| table.has_column(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn table(csv: &str) -> Table {
        Table::from_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_aliases_canonicalized_without_overwrite() {
        let mut t = table("organisation,client\nacme,alice\n");
        canonicalize_columns(&mut t);
        assert!(t.has_column("organization"));
        assert!(t.has_column("client_name"));

        let mut t = table("organisation,organization\na,b\n");
        canonicalize_columns(&mut t);
        assert_eq!(t.get(0, "organization"), &Value::Str("b".into()));
    }

    #[test]
    fn test_merge_joins_on_preferred_keys() {
        let f = table("client_name,emotion\nalice,joy\nbob,fear\n");
        let m = table("client_name,severity\nalice,high\n");
        let r = table("reporter,phone\n,\n");

        let merged = merge_sources(f, m, r);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(0, "severity"), &Value::Str("high".into()));
        assert!(merged.get(1, "severity").is_null());
    }

    #[test]
    fn test_merge_skips_source_without_keys() {
        let f = table("client_name,emotion\nalice,joy\n");
        let m = table("unrelated\nx\n");
        let merged = merge_sources(f, m, Table::new());

        assert!(!merged.has_column("unrelated"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_empty_second_source_degrades() {
        let f = table("client_name,emotion\nalice,joy\n");
        let merged = merge_sources(f.clone(), Table::new(), Table::new());

        assert_eq!(merged.len(), f.len());
        for field in RECOGNIZED_FIELDS {
            assert!(merged.has_column(field), "missing {field}");
        }
        assert_eq!(merged.get(0, "emotion"), &Value::Str("joy".into()));
        assert!(merged.get(0, "dob").is_null());
    }

    #[test]
    fn test_merge_suffixes_collided_columns() {
        let f = table("client_name,severity\nalice,low\n");
        let m = table("client_name,severity\nalice,high\n");

        let merged = merge_sources(f, m, Table::new());
        assert_eq!(merged.get(0, "severity"), &Value::Str("low".into()));
        assert_eq!(merged.get(0, "severity_m"), &Value::Str("high".into()));
    }

    #[test]
    fn test_recognized_fields_always_present() {
        let merged = merge_sources(
            table("incident_date\n2024-01-01\n"),
            Table::new(),
            Table::new(),
        );
        assert!(has_recognized_fields(&merged));
    }
}
