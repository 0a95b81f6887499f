//! The deterministic and assisted preparation passes.
//!
//! Both passes are pure over the table: persistence belongs to the
//! orchestrator. `now` is a parameter so age computation is
//! deterministic under test.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::clean::{
    age_band, age_years, coerce_recurrence, elapsed_hours, extract_hour, month_bucket,
    normalize_value, parse_datetime, parse_duration_hours, recurrence_counts, weekday_name, year,
};
use crate::traits::enricher::CategoryEnricher;
use crate::types::{Table, Value, Vocabularies, ENRICHED_COLUMNS, ENRICHMENT_VALUE_CAP};

/// Run the deterministic preparation pass.
///
/// Adds parsed timestamps, calendar buckets, age, normalized severity
/// and emotion, recurrence, and resolution hours. Never fails on bad
/// data: parse failures become nulls or zero sentinels.
pub fn manual_prepare(table: &Table, vocabularies: &Vocabularies, now: NaiveDateTime) -> Table {
    let mut out = table.clone();
    let rows = out.len();

    // Base timestamps.
    for i in 0..rows {
        let incident = parse_cell_datetime(&out, i, "incident_date");
        out.set(i, "incident_dt", incident.into());
        let reported = parse_cell_datetime(&out, i, "reported_date");
        out.set(i, "reported_dt", reported.into());
    }

    // Hour of day from the raw time string.
    for i in 0..rows {
        let hour = match out.get(i, "incident_time") {
            Value::Null => None,
            other => extract_hour(&other.render()),
        };
        out.set(i, "incident_hour", hour.map(|h| h as i64).into());
    }

    // Calendar buckets from the incident timestamp.
    for i in 0..rows {
        match out.get(i, "incident_dt").as_datetime() {
            Some(dt) => {
                out.set(i, "year", Value::Int(year(dt)));
                out.set(i, "month", Value::Str(month_bucket(dt)));
                out.set(i, "dow", Value::Str(weekday_name(dt)));
            }
            None => {
                out.set(i, "year", Value::Null);
                out.set(i, "month", Value::Null);
                out.set(i, "dow", Value::Null);
            }
        }
    }

    apply_age(&mut out, now);

    for i in 0..rows {
        let norm = normalize_value(out.get(i, "severity"), &vocabularies.severity);
        out.set(i, "severity_norm", norm);
    }

    apply_recurrence(&mut out);
    apply_resolution_hours(&mut out);

    for i in 0..rows {
        let norm = normalize_value(out.get(i, "emotion"), &vocabularies.emotion);
        out.set(i, "emotion_norm", norm);
    }

    debug!(rows, columns = out.columns().len(), "manual preparation complete");
    out
}

/// Run the assisted pass: the deterministic pass, then model-proposed
/// category columns for the fixed target set.
///
/// An empty mapping (the collaborator's failure mode) degrades each
/// derived column to a copy of the raw column.
pub async fn assisted_prepare<E: CategoryEnricher>(
    table: &Table,
    vocabularies: &Vocabularies,
    now: NaiveDateTime,
    enricher: &E,
) -> Table {
    let mut out = manual_prepare(table, vocabularies, now);

    for column in ENRICHED_COLUMNS {
        let mut values = out.distinct_strings(column);
        values.truncate(ENRICHMENT_VALUE_CAP);
        values.sort();

        let mapping = enricher.enrich(column, &values).await;
        debug!(column, entries = mapping.len(), "applying enrichment mapping");

        let derived = format!("{column}_norm_llm");
        let raw: Vec<Value> = (0..out.len()).map(|i| out.get(i, column).clone()).collect();
        for (i, value) in raw.into_iter().enumerate() {
            let mapped = match &value {
                Value::Null => Value::Null,
                other => {
                    let rendered = other.render();
                    match mapping.get(&rendered) {
                        Some(normalized) => Value::Str(normalized.clone()),
                        None => value.clone(),
                    }
                }
            };
            out.set(i, &derived, mapped);
        }
    }

    out
}

fn parse_cell_datetime(table: &Table, row: usize, column: &str) -> Option<NaiveDateTime> {
    match table.get(row, column) {
        Value::Null => None,
        Value::DateTime(dt) => Some(*dt),
        other => parse_datetime(&other.render()),
    }
}

fn apply_age(out: &mut Table, now: NaiveDateTime) {
    for i in 0..out.len() {
        let dob = parse_cell_datetime(out, i, "dob");
        match dob {
            Some(dob) => {
                let age = age_years(dob, now);
                out.set(i, "age_years", Value::Float(age));
                out.set(i, "age_group", age_band(age).map(Value::from).into());
            }
            None => {
                out.set(i, "age_years", Value::Null);
                out.set(i, "age_group", Value::Null);
            }
        }
    }
}

fn apply_recurrence(out: &mut Table) {
    if out.all_null("recurrence") {
        let counts = recurrence_counts(out);
        for (i, count) in counts.into_iter().enumerate() {
            out.set(i, "recurrence", Value::Int(count));
        }
    } else {
        for i in 0..out.len() {
            let coerced = coerce_recurrence(out.get(i, "recurrence"));
            out.set(i, "recurrence", Value::Int(coerced));
        }
    }
}

fn apply_resolution_hours(out: &mut Table) {
    let has_explicit = !out.all_null("resolution_time");
    for i in 0..out.len() {
        let hours = if has_explicit {
            match out.get(i, "resolution_time") {
                Value::Null => None,
                other => parse_duration_hours(&other.render()),
            }
        } else {
            match (
                out.get(i, "incident_dt").as_datetime(),
                out.get(i, "reported_dt").as_datetime(),
            ) {
                (Some(incident), Some(reported)) => Some(elapsed_hours(incident, reported)),
                _ => None,
            }
        };
        // Unknown durations collapse to zero, indistinguishable from an
        // instant resolution in the output.
        let hours = hours.unwrap_or(0.0).max(0.0);
        out.set(i, "resolution_hours", Value::Float(hours));
    }
}
