//! Dynamic table rows
//!
//! Every domain table is read and written as a JSON object. Typing lives in
//! the per-domain schema (`FieldSpec`), so a `Record` only offers lenient
//! accessors that match how the reports read values: missing or null
//! numbers count as zero and blank strings count as absent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::ID_COLUMN;
use crate::errors::{OpsBoardError, Result};

/// Backend-generated record identifier (UUID or bigint rendered as text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Identifier as the backend renders it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Text form used in `id=eq.` predicates.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// One row of a domain table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(OpsBoardError::validation(format!(
                "expected a JSON object for a record, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Unwrap into the JSON object sent to the backend.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// All columns and their raw values.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Raw value of `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Insert or overwrite `column`.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Drop `column`, returning its old value.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.0.remove(column)
    }

    /// True when `column` is present, even as null.
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column names in key order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Identifier assigned by the backend, if the row has been persisted.
    pub fn id(&self) -> Option<RecordId> {
        match self.0.get(ID_COLUMN)? {
            Value::String(s) if !s.trim().is_empty() => Some(RecordId::new(s.trim())),
            Value::Number(n) => Some(RecordId::new(n.to_string())),
            _ => None,
        }
    }

    /// Integer view of a column. Missing, null and unparseable values are 0;
    /// decimals are truncated.
    pub fn int(&self, column: &str) -> i64 {
        self.0.get(column).map_or(0, value_as_i64)
    }

    /// Floating-point view of a column, 0.0 when absent.
    pub fn number(&self, column: &str) -> f64 {
        self.0.get(column).map_or(0.0, value_as_f64)
    }

    /// Text view of a column. Numbers and booleans are rendered; null,
    /// missing and blank strings are `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.0.get(column)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// True when the column is missing, null or a blank string.
    pub fn is_blank(&self, column: &str) -> bool {
        match self.0.get(column) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn value_as_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate_f64))
            .unwrap_or(0),
        Value::String(s) => parse_lenient_i64(s),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn value_as_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Parse an integer the way spreadsheet users type it: surrounding spaces are
/// ignored and decimal text is truncated. Anything else is 0.
pub fn parse_lenient_i64(text: &str) -> i64 {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|v| v.is_finite()).map(truncate_f64))
        .unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_f64(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        0
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
