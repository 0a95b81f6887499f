//! Fuzzy date/time parsing.
//!
//! Source tables carry dates typed by hand: loosely punctuated,
//! locale-ambiguous, sometimes wrapped in prose. The parser is
//! tolerant: it disambiguates year-first, skips tokens that cannot be
//! part of a date, and resolves any failure to `None` rather than an
//! error. Nothing here panics on bad input.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Datetime layouts, tried in order. Year-first layouts come before the
/// ambiguous slashed ones, and slashed layouts are month-first (day
/// first only as a fallback when the month slot overflows).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%d %B %Y %H:%M",
    "%b %d %Y %H:%M",
    "%B %d %Y %H:%M",
];

/// Date-only layouts, midnight assumed.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d-%b-%Y",
];

/// Offset-carrying layouts that are not quite RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%z"];

/// Tokens that carry no date information and are skipped outright.
const FILLER_TOKENS: &[&str] = &["on", "at", "of", "the", "around", "about", "approx"];

const MONTH_PREFIXES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse an arbitrary date/time string into a zone-less timestamp.
///
/// Returns `None` for empty, null-ish, or unparseable input. Offsets
/// are stripped via [`to_naive`].
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(to_naive(dt));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(to_naive(dt));
        }
    }

    let cleaned = cleanup(trimmed);
    if let Some(dt) = try_formats(&cleaned) {
        return Some(dt);
    }

    // Fuzzy pass: drop tokens that cannot be part of a date and retry.
    let fuzzy = date_like_tokens(&cleaned);
    if fuzzy != cleaned {
        if let Some(dt) = try_formats(&fuzzy) {
            return Some(dt);
        }
    }

    // Last resort: any single digit-bearing token that parses on its own.
    for token in fuzzy.split(' ') {
        if token.chars().any(|c| c.is_ascii_digit()) {
            if let Some(dt) = try_formats(token) {
                return Some(dt);
            }
        }
    }

    None
}

/// Strip a time-zone offset, normalizing to a zone-less UTC instant.
pub fn to_naive(value: DateTime<FixedOffset>) -> NaiveDateTime {
    value.naive_utc()
}

/// Leading colon-delimited numeric token of a raw time string, as an
/// hour. `None` for empty or unparseable input.
pub fn extract_hour(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.split(':').next()?.trim().parse::<u32>().ok()
}

/// Calendar year of a timestamp.
pub fn year(dt: NaiveDateTime) -> i64 {
    dt.year() as i64
}

/// Year-month bucket, e.g. `2024-03`.
pub fn month_bucket(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m").to_string()
}

/// Weekday name, e.g. `Tuesday`.
pub fn weekday_name(dt: NaiveDateTime) -> String {
    dt.format("%A").to_string()
}

fn try_formats(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Lower-case, strip punctuation and ordinal suffixes, drop filler
/// tokens.
fn cleanup(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut tokens = Vec::new();
    for raw_token in lower.split_whitespace() {
        let token = raw_token.trim_matches(|c: char| matches!(c, ',' | ';' | '(' | ')' | '"'));
        if token.is_empty() || FILLER_TOKENS.contains(&token) {
            continue;
        }
        tokens.push(strip_ordinal(token));
    }
    tokens.join(" ")
}

/// `5th` -> `5`, leaving non-ordinal tokens untouched.
fn strip_ordinal(token: &str) -> String {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}

/// Keep only tokens that could belong to a date: digit-bearing tokens
/// and month names.
fn date_like_tokens(s: &str) -> String {
    s.split(' ')
        .filter(|t| {
            t.chars().any(|c| c.is_ascii_digit())
                || MONTH_PREFIXES.iter().any(|m| t.starts_with(m))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_empty_and_garbage_return_none() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("   "), None);
        assert_eq!(parse_datetime("not a date"), None);
    }

    #[test]
    fn test_iso_date() {
        let dt = parse_datetime("2024-03-05").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_iso_datetime_variants() {
        let dt = parse_datetime("2024-03-05 14:30:22").unwrap();
        assert_eq!(dt.hour(), 14);
        let dt = parse_datetime("2024-03-05T14:30:22").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_offset_is_stripped_to_utc() {
        let dt = parse_datetime("2024-03-05T10:00:00+10:00").unwrap();
        assert_eq!((dt.day(), dt.hour()), (5, 0));
    }

    #[test]
    fn test_month_first_disambiguation() {
        // dayfirst is off: 05/03 is May 3rd.
        let dt = parse_datetime("05/03/2024").unwrap();
        assert_eq!((dt.month(), dt.day()), (5, 3));
        // ...unless the month slot overflows.
        let dt = parse_datetime("25/12/2023").unwrap();
        assert_eq!((dt.month(), dt.day()), (12, 25));
    }

    #[test]
    fn test_prose_and_ordinals() {
        let dt = parse_datetime("March 5th, 2024 at 14:30").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 3, 5, 14));

        let dt = parse_datetime("reported 2024-03-05").unwrap();
        assert_eq!((dt.month(), dt.day()), (3, 5));
    }

    #[test]
    fn test_extract_hour() {
        assert_eq!(extract_hour("14:30"), Some(14));
        assert_eq!(extract_hour(" 9:05:00 "), Some(9));
        assert_eq!(extract_hour("7"), Some(7));
        assert_eq!(extract_hour(""), None);
        assert_eq!(extract_hour("noon"), None);
    }

    #[test]
    fn test_derived_fields() {
        let dt = parse_datetime("2024-03-05 14:30").unwrap();
        assert_eq!(year(dt), 2024);
        assert_eq!(month_bucket(dt), "2024-03");
        assert_eq!(weekday_name(dt), "Tuesday");
    }
}
