//! Deterministic cleaning passes: dates, categories, derived metrics.

pub mod category;
pub mod datetime;
pub mod metrics;

pub use category::{normalize, normalize_value};
pub use datetime::{extract_hour, month_bucket, parse_datetime, to_naive, weekday_name, year};
pub use metrics::{
    age_band, age_years, coerce_recurrence, elapsed_hours, parse_duration_hours,
    recurrence_counts,
};
