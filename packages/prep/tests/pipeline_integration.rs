//! Integration tests for the full preparation pipeline.
//!
//! These tests drive the whole run over an in-memory store:
//! 1. Load three sources (some possibly missing)
//! 2. Merge with best-available keys
//! 3. Prepare (manual and assisted)
//! 4. Persist the variant slot and the current prepared slot

use prep::{
    testing::MockEnricher, CategoryMapping, MemoryStore, NoopEnricher, Pipeline, Table,
    TableStore, Value, Variant, DST_MANUAL, DST_MERGED, DST_OLLAMA, DST_PREP, RECOGNIZED_FIELDS,
    SRC_FINAL, SRC_MAIN, SRC_REPORTER,
};

fn table(csv: &str) -> Table {
    Table::from_csv(csv.as_bytes()).unwrap()
}

/// Helper to seed a store with the three sources.
fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_table(
            SRC_FINAL,
            table(
                "client_name,incident_date,incident_time,incident_type,severity,emotion\n\
                 alice,2024-03-05,14:30,fall,high,joy\n\
                 alice,2024-04-01,09:00,fall,med,sadness\n\
                 bob,2024-03-20,,medication,critical,fear\n",
            ),
        )
        .with_table(
            SRC_MAIN,
            table(
                "client,dob,actions_taken,report_date\n\
                 alice,1990-06-15,called nurse,2024-03-05 17:00\n\
                 bob,2015-01-01,escalated,2024-03-21\n",
            ),
        )
        .with_table(SRC_REPORTER, table("reporter,organization\nsam,acme\n"))
}

#[tokio::test]
async fn test_manual_run_end_to_end() {
    let store = seeded_store();
    let pipeline = Pipeline::new(store, NoopEnricher);

    let prepared = pipeline.run(Variant::Manual).await.unwrap();

    // Aliases resolved and joined through client_name.
    assert_eq!(prepared.len(), 3);
    assert_eq!(
        prepared.get(0, "actions_taken"),
        &Value::Str("called nurse".into())
    );

    // Every recognized field exists on every row.
    for field in RECOGNIZED_FIELDS {
        assert!(prepared.has_column(field), "missing {field}");
    }

    // Normalization and derived metrics.
    assert_eq!(prepared.get(0, "severity_norm"), &Value::Str("High".into()));
    assert_eq!(prepared.get(1, "severity_norm"), &Value::Str("Medium".into()));
    assert_eq!(prepared.get(2, "emotion_norm"), &Value::Str("Fear".into()));
    assert_eq!(prepared.get(0, "incident_hour"), &Value::Int(14));
    assert_eq!(prepared.get(0, "recurrence"), &Value::Int(2));
    assert_eq!(prepared.get(2, "recurrence"), &Value::Int(1));
    // reported 2024-03-05 17:00, incident 14:30 only via date column: 2024-03-05 00:00.
    assert_eq!(prepared.get(0, "resolution_hours"), &Value::Float(17.0));

    // Merged, variant, and current slots all persisted.
    let store = pipeline.store();
    assert!(store.contains(DST_MERGED));
    assert!(store.contains(DST_MANUAL));
    assert!(store.contains(DST_PREP));
    assert!(!store.contains(DST_OLLAMA));
    assert_eq!(store.load(DST_PREP).await.unwrap(), prepared);
}

#[tokio::test]
async fn test_assisted_run_applies_mapping_with_fallback() {
    let mut mapping = CategoryMapping::new();
    mapping.insert("fall".to_string(), "Fall".to_string());

    let enricher = MockEnricher::new().with_mapping("incident_type", mapping);
    let pipeline = Pipeline::new(seeded_store(), enricher);

    let prepared = pipeline.run(Variant::Ollama).await.unwrap();

    // Mapped keys normalize, absent keys fall back to the raw value.
    assert_eq!(
        prepared.get(0, "incident_type_norm_llm"),
        &Value::Str("Fall".into())
    );
    assert_eq!(
        prepared.get(2, "incident_type_norm_llm"),
        &Value::Str("medication".into())
    );

    // Columns with no mapping copy the raw column unchanged.
    assert_eq!(
        prepared.get(0, "severity_norm_llm"),
        prepared.get(0, "severity")
    );

    assert!(pipeline.store().contains(DST_OLLAMA));
    assert!(pipeline.store().contains(DST_PREP));
}

#[tokio::test]
async fn test_enricher_receives_sorted_distinct_values() {
    let enricher = MockEnricher::new();
    let pipeline = Pipeline::new(seeded_store(), enricher);

    pipeline.run(Variant::Ollama).await.unwrap();

    let calls = pipeline.enricher().calls();
    assert_eq!(calls.len(), 3);
    let incident_call = calls
        .iter()
        .find(|c| c.column == "incident_type")
        .expect("incident_type enrichment call");
    assert_eq!(incident_call.values, vec!["fall", "medication"]);
}

#[tokio::test]
async fn test_missing_source_degrades_gracefully() {
    let store = MemoryStore::new().with_table(
        SRC_FINAL,
        table("client_name,emotion\nalice,joy\n"),
    );
    let pipeline = Pipeline::new(store, NoopEnricher);

    let prepared = pipeline.run(Variant::Manual).await.unwrap();
    assert_eq!(prepared.len(), 1);
    assert!(prepared.get(0, "dob").is_null());
    assert_eq!(prepared.get(0, "resolution_hours"), &Value::Float(0.0));
}

#[tokio::test]
async fn test_persistence_failure_surfaces() {
    let pipeline = Pipeline::new(prep::FailingStore, NoopEnricher);
    let result = pipeline.run(Variant::Manual).await;
    assert!(result.is_err());
}
