//! Cell values and declared column types.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// ISO-8601 rendering used for temporal statistics.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// true/false values.
    Boolean,
    /// Dates and timestamps.
    DateTime,
    /// Anything else.
    Text,
}

impl DataType {
    /// Returns true for integer and float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Returns true for date/time columns.
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::DateTime)
    }

    /// Broad type family: numeric, datetime, boolean or string.
    pub fn family(&self) -> &'static str {
        match self {
            DataType::Integer | DataType::Float => "numeric",
            DataType::DateTime => "datetime",
            DataType::Boolean => "boolean",
            DataType::Text => "string",
        }
    }

    /// Short name as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::DateTime => "datetime",
            DataType::Text => "text",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Non-finite values are treated as null everywhere.
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Check if this cell is missing.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => !f.is_finite(),
            _ => false,
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Hashable identity of the cell, used for distinct counts and
    /// duplicate-row detection. All nulls share one key.
    pub fn key(&self) -> ValueKey<'_> {
        match self {
            v if v.is_null() => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            // -0.0 and 0.0 are the same value
            Value::Float(f) => ValueKey::Float((*f + 0.0).to_bits()),
            Value::Text(s) => ValueKey::Text(s),
            Value::DateTime(dt) => ValueKey::DateTime(*dt),
            Value::Null => ValueKey::Null,
        }
    }

    /// The type a lone value would declare.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            v if v.is_null() => None,
            Value::Bool(_) => Some(DataType::Boolean),
            Value::Int(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Text(_) => Some(DataType::Text),
            Value::DateTime(_) => Some(DataType::DateTime),
            Value::Null => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Null => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Borrowed, hashable form of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(&'a str),
    DateTime(NaiveDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_nan_is_null() {
        assert!(Value::Float(f64::NAN).is_null());
        assert!(Value::Null.is_null());
        assert!(!Value::Float(0.0).is_null());
        assert_eq!(Value::Float(f64::NAN).key(), ValueKey::Null);
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");

        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "2024-01-15 09:30:00");
    }

    #[test]
    fn test_negative_zero_key() {
        assert_eq!(Value::Float(-0.0).key(), Value::Float(0.0).key());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".into()));
    }

    #[test]
    fn test_type_family() {
        assert_eq!(DataType::Integer.family(), "numeric");
        assert_eq!(DataType::Float.family(), "numeric");
        assert_eq!(DataType::Text.family(), "string");
        assert!(DataType::DateTime.is_temporal());
    }

    #[test]
    fn test_infinite_float_is_null() {
        for f in [f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Value::Float(f).is_null());
            assert_eq!(Value::Float(f).as_f64(), None);
            assert_eq!(Value::Float(f).key(), ValueKey::Null);
        }
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Value::Text("abc".into()).as_text(), Some("abc"));
        assert_eq!(Value::Int(1).as_text(), None);
    }
}
