//! Coercion of form values and spreadsheet cells to field kinds
//!
//! Both the editor and the importer funnel raw input through [`coerce`], so
//! a value typed in the form and the same value read from a spreadsheet end
//! up stored identically.

use chrono::{NaiveDate, NaiveDateTime};
use opsboard_domain::utils::dates::{
    excel_fraction_to_time, excel_serial_to_date, month_key, parse_date, parse_month, parse_time,
};
use opsboard_domain::{parse_lenient_i64, Cell, FieldKind, FieldSpec, Record};
use serde_json::{Number, Value};

/// One raw input value before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Json(Value),
}

impl RawValue {
    /// Read a form value. Null and blank strings are missing.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) if s.trim().is_empty() => Self::Missing,
            Some(Value::String(s)) => Self::Text(s.trim().to_string()),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Missing, Self::Number),
            Some(Value::Bool(b)) => Self::Text(b.to_string()),
            Some(other) => Self::Json(other.clone()),
        }
    }

    /// Read a spreadsheet cell. Empty and whitespace-only cells are missing.
    pub fn from_cell(cell: Option<&Cell>) -> Self {
        match cell {
            None => Self::Missing,
            Some(cell) if cell.is_blank() => Self::Missing,
            Some(Cell::Number(n)) => Self::Number(*n),
            Some(Cell::DateTime(dt)) => Self::DateTime(*dt),
            Some(other) => other.to_text().map_or(Self::Missing, Self::Text),
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => Cell::Number(*n).to_text().unwrap_or_default(),
            Self::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Json(v) => v.to_string(),
        }
    }
}

/// Coerce one raw value to `field`'s kind.
///
/// Missing values take the field default, or the kind default: 0 for
/// numbers, today for dates (null when the field is nullable), the current
/// month for months, empty text, and null for times and JSON. Values that
/// cannot be read as the kind fail with a message naming the field.
pub fn coerce(field: &FieldSpec, raw: RawValue, today: NaiveDate) -> Result<Value, String> {
    if raw == RawValue::Missing {
        return match field.default {
            Some(default) => coerce(field, RawValue::Text(default.to_string()), today),
            None => Ok(missing_value(field, today)),
        };
    }

    let invalid = || format!("invalid {} {:?} in \"{}\"", field.kind, raw.display(), field.label);

    match field.kind {
        FieldKind::Integer => Ok(Value::from(match &raw {
            RawValue::Number(n) => truncate(*n),
            RawValue::Text(s) => parse_lenient_i64(s),
            _ => 0,
        })),
        FieldKind::Decimal => {
            let n = match &raw {
                RawValue::Number(n) => *n,
                RawValue::Text(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
                _ => 0.0,
            };
            Ok(Number::from_f64(n).map_or(Value::from(0), Value::Number))
        }
        FieldKind::Text | FieldKind::Timestamp => Ok(Value::String(raw.display())),
        FieldKind::Date => {
            let date = match &raw {
                RawValue::DateTime(dt) => Some(dt.date()),
                RawValue::Number(n) => excel_serial_to_date(*n),
                RawValue::Text(s) => parse_date(s).or_else(|| first_of_month(s)),
                RawValue::Json(_) | RawValue::Missing => None,
            };
            date.map(|d| Value::String(d.format("%Y-%m-%d").to_string())).ok_or_else(invalid)
        }
        FieldKind::Month => {
            let month = match &raw {
                RawValue::DateTime(dt) => Some(month_key(dt.date())),
                RawValue::Number(n) => excel_serial_to_date(*n).map(month_key),
                RawValue::Text(s) => parse_month(s),
                RawValue::Json(_) | RawValue::Missing => None,
            };
            month.map(Value::String).ok_or_else(invalid)
        }
        FieldKind::Time => {
            let time = match &raw {
                RawValue::DateTime(dt) => Some(dt.time()),
                RawValue::Number(n) => excel_fraction_to_time(*n),
                RawValue::Text(s) => parse_time(s),
                RawValue::Json(_) | RawValue::Missing => None,
            };
            time.map(|t| Value::String(t.format("%H:%M").to_string())).ok_or_else(invalid)
        }
        FieldKind::Json => match raw {
            RawValue::Json(value) => Ok(value),
            RawValue::Text(s) => serde_json::from_str(&s)
                .map_err(|_| format!("invalid JSON in \"{}\"", field.label)),
            other => Err(format!("invalid JSON {:?} in \"{}\"", other.display(), field.label)),
        },
    }
}

fn missing_value(field: &FieldSpec, today: NaiveDate) -> Value {
    match field.kind {
        FieldKind::Integer => Value::from(0),
        FieldKind::Decimal => Value::from(0.0),
        FieldKind::Text => Value::String(String::new()),
        FieldKind::Date if field.nullable => Value::Null,
        FieldKind::Date => Value::String(today.format("%Y-%m-%d").to_string()),
        FieldKind::Month => Value::String(month_key(today)),
        FieldKind::Time | FieldKind::Json | FieldKind::Timestamp => Value::Null,
    }
}

fn first_of_month(text: &str) -> Option<NaiveDate> {
    let month = parse_month(text)?;
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(n: f64) -> i64 {
    if n.is_finite() {
        n.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        0
    }
}

/// Build a write payload from a submitted form: every input field is
/// coerced and defaulted; unknown, audit, derived and server columns are
/// dropped.
pub fn normalize_form<'a>(
    fields: impl Iterator<Item = &'a FieldSpec>,
    form: &Record,
    today: NaiveDate,
) -> Result<Record, String> {
    let mut record = Record::new();
    for field in fields {
        let value = coerce(field, RawValue::from_json(form.get(field.name)), today)?;
        record.set(field.name, value);
    }
    Ok(record)
}
