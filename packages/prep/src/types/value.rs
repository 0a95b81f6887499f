//! Cell values for flat tables.
//!
//! Source tables arrive as CSV, so every cell starts life as a string
//! (or null). Cleaning passes replace strings with typed values where
//! they derive something numeric or temporal.

use chrono::NaiveDateTime;
use std::fmt;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing or empty cell
    Null,

    /// Raw or normalized text
    Str(String),

    /// Integer metric (recurrence, hour, year)
    Int(i64),

    /// Fractional metric (resolution hours, age)
    Float(f64),

    /// Parsed zone-less timestamp
    DateTime(NaiveDateTime),
}

impl Value {
    /// Parse a CSV field: empty string means null.
    pub fn from_csv_field(field: &str) -> Self {
        if field.is_empty() {
            Value::Null
        } else {
            Value::Str(field.to_string())
        }
    }

    /// True for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text content, if this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The parsed timestamp, if this is a datetime cell.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Numeric view of the cell: ints and floats directly, strings via
    /// parsing. Null and unparseable text yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Render the cell the way it is written to CSV. Null renders as
    /// the empty string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_round_trip() {
        assert_eq!(Value::from_csv_field(""), Value::Null);
        assert_eq!(Value::from_csv_field("High"), Value::Str("High".into()));
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Float(2.5).render(), "2.5");
    }

    #[test]
    fn test_as_str_views_only_text_cells() {
        assert_eq!(Value::Str("High".into()).as_str(), Some("High"));
        assert_eq!(Value::Int(3).as_str(), None);
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_as_f64_coercion() {
        assert_eq!(Value::Str(" 3.5 ".into()).as_f64(), Some(3.5));
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Str("garbage".into()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }
}
