//! Backend-shaped raw records
//!
//! Both catalog backends return loosely typed JSON documents. `RawRecord`
//! wraps one such document and offers tolerant, name-based accessors: a
//! missing field, a JSON `null` and an empty string all read as absent.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw record as fetched from a backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from an arbitrary JSON value; non-objects yield an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Resolve a dotted path such as `format.bindingCode`
    pub fn path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.0.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Field as a trimmed string; numbers and booleans are stringified
    pub fn str_field(&self, path: &str) -> Option<String> {
        self.path(path).and_then(value_to_string)
    }

    /// Field as an unsigned integer, accepting numeric strings
    pub fn u32_field(&self, path: &str) -> Option<u32> {
        match self.path(path)? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Field as a decimal; accepts `17.88`, `"17.88"` and `"17,88"`
    pub fn decimal_field(&self, path: &str) -> Option<Decimal> {
        self.path(path).and_then(value_to_decimal)
    }

    /// Field as a calendar date; see [`parse_date`] for accepted shapes
    pub fn date_field(&self, path: &str) -> Option<NaiveDate> {
        self.str_field(path).and_then(|s| parse_date(&s))
    }

    pub fn bool_field(&self, path: &str) -> Option<bool> {
        match self.path(path)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Field as a list of nested records; absent or non-array yields empty
    pub fn array_field(&self, path: &str) -> Vec<RawRecord> {
        match self.path(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object().cloned().map(RawRecord))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Nested object as a record
    pub fn object_field(&self, path: &str) -> Option<RawRecord> {
        self.path(path)
            .and_then(Value::as_object)
            .cloned()
            .map(RawRecord)
    }

    /// Field names of the record
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse a price-like value, tolerating a comma decimal separator and spaces
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Parse a decimal written with either `,` or `.` as the decimal separator.
///
/// When both appear, the last one separates the decimals and the other groups
/// thousands. A separator repeated on its own also groups thousands.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let decimal_sep = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if compact.matches(',').count() == 1 => Some(','),
        (None, Some(_)) if compact.matches('.').count() == 1 => Some('.'),
        _ => None,
    };
    let cleaned: String = compact
        .chars()
        .filter_map(|c| match c {
            ',' | '.' if Some(c) == decimal_sep => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect();

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Parse `2024-03-01`, `2024-03-01T00:00:00Z`, `20240301` or the Finnish `1.3.2024`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"))
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d.%m.%Y"))
        .ok()
}
