//! Derived incident metrics: recurrence, resolution time, and age.

use chrono::NaiveDateTime;

use crate::types::{Table, Value};

/// Fractional years per day, for DOB-based age.
const DAYS_PER_YEAR: f64 = 365.25;

/// Parse an explicit resolution-duration string into fractional hours.
///
/// Accepts `"<hours>h<minutes>m"` and bare numerics. Anything else is
/// `None`; the caller coerces that to zero.
pub fn parse_duration_hours(raw: &str) -> Option<f64> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    if s.contains('h') && s.contains('m') {
        let (hours_part, rest) = s.split_once('h')?;
        let (minutes_part, _) = rest.split_once('m')?;
        let hours: i64 = hours_part.trim().parse().ok()?;
        let minutes: i64 = minutes_part.trim().parse().ok()?;
        return Some(hours as f64 + minutes as f64 / 60.0);
    }
    s.parse::<f64>().ok()
}

/// Elapsed hours between incident and report timestamps.
pub fn elapsed_hours(incident: NaiveDateTime, reported: NaiveDateTime) -> f64 {
    (reported - incident).num_seconds() as f64 / 3600.0
}

/// Age in fractional years at `now`, with `now` normalized to midnight.
pub fn age_years(dob: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let midnight = now
        .date()
        .and_hms_opt(0, 0, 0)
        .unwrap_or(now);
    (midnight - dob).num_days() as f64 / DAYS_PER_YEAR
}

/// Fixed age band with left-inclusive boundaries and an open top band.
/// Negative ages get no band.
pub fn age_band(age: f64) -> Option<&'static str> {
    if age < 0.0 || age.is_nan() {
        None
    } else if age < 12.0 {
        Some("0-12")
    } else if age < 18.0 {
        Some("13-18")
    } else if age < 30.0 {
        Some("19-30")
    } else if age < 45.0 {
        Some("31-45")
    } else if age < 60.0 {
        Some("46-60")
    } else {
        Some("60+")
    }
}

/// Coerce a supplied recurrence cell to a non-negative integer.
/// Non-numeric entries become zero.
pub fn coerce_recurrence(value: &Value) -> i64 {
    value.as_f64().map(|f| f as i64).unwrap_or(0).max(0)
}

/// Count rows sharing the same (client identity, incident type) pair.
///
/// Returns one count per row, aligned with row order. Null cells group
/// together, matching the grouped-count semantics of the source data.
/// Running this over already-computed output yields the same counts,
/// because the grouping ignores the recurrence column itself.
pub fn recurrence_counts(table: &Table) -> Vec<i64> {
    use std::collections::HashMap;

    let key = |row: usize| -> (Option<String>, Option<String>) {
        let client = table.get(row, "client_name");
        let kind = table.get(row, "incident_type");
        (
            (!client.is_null()).then(|| client.render()),
            (!kind.is_null()).then(|| kind.render()),
        )
    };

    let mut counts: HashMap<(Option<String>, Option<String>), i64> = HashMap::new();
    for i in 0..table.len() {
        *counts.entry(key(i)).or_insert(0) += 1;
    }

    (0..table.len()).map(|i| counts[&key(i)]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Table;
    use chrono::NaiveDate;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_duration_strings() {
        assert_eq!(parse_duration_hours("1h30m"), Some(1.5));
        assert_eq!(parse_duration_hours("2"), Some(2.0));
        assert_eq!(parse_duration_hours(" 4h 15m "), Some(4.25));
        assert_eq!(parse_duration_hours("garbage"), None);
        assert_eq!(parse_duration_hours(""), None);
    }

    #[test]
    fn test_elapsed_hours() {
        let incident = dt("2024-03-05");
        let reported = incident + chrono::Duration::minutes(150);
        assert!((elapsed_hours(incident, reported) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_band(11.9), Some("0-12"));
        assert_eq!(age_band(12.0), Some("13-18"));
        assert_eq!(age_band(29.99), Some("19-30"));
        assert_eq!(age_band(60.0), Some("60+"));
        assert_eq!(age_band(200.0), Some("60+"));
        assert_eq!(age_band(-1.0), None);
        assert_eq!(age_band(f64::NAN), None);
    }

    #[test]
    fn test_coerce_recurrence() {
        assert_eq!(coerce_recurrence(&Value::Str("3".into())), 3);
        assert_eq!(coerce_recurrence(&Value::Str("2.7".into())), 2);
        assert_eq!(coerce_recurrence(&Value::Str("often".into())), 0);
        assert_eq!(coerce_recurrence(&Value::Null), 0);
        assert_eq!(coerce_recurrence(&Value::Int(-4)), 0);
    }

    #[test]
    fn test_recurrence_counts_group_by_client_and_type() {
        let table = Table::from_csv(
            b"client_name,incident_type\nalice,fall\nalice,fall\nalice,medication\nbob,fall\n",
        )
        .unwrap();
        assert_eq!(recurrence_counts(&table), vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_recurrence_counts_idempotent() {
        let table = Table::from_csv(
            b"client_name,incident_type,recurrence\nalice,fall,2\nalice,fall,2\n",
        )
        .unwrap();
        // Counts ignore the recurrence column, so a second pass agrees.
        assert_eq!(recurrence_counts(&table), vec![2, 2]);
    }
}
