//! Date parsing for spreadsheet cells and filter values
//!
//! Spreadsheets arrive with dates as real date cells, Excel serial numbers,
//! ISO strings or `DD/MM/YYYY` text. Everything is normalized to
//! `NaiveDate` here and rendered back as `YYYY-MM-DD` / `YYYY-MM`.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

/// Formats tried in order for textual dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Serial 0 in the 1900 date system, after the leap-year bug shift.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial Excel accepts (9999-12-31).
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Parse a textual date. Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, `YYYY/MM/DD`,
/// `DD-MM-YYYY` and ISO timestamps (only the date part is kept).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // 2026-02-14T10:00:00Z, 2026-02-14 10:00:00
    if trimmed.len() > 10 && trimmed.is_char_boundary(10) {
        let (head, rest) = trimmed.split_at(10);
        if rest.starts_with('T') || rest.starts_with(' ') {
            return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
        }
    }
    None
}

/// Convert an Excel serial day number to a date. Fractions (time of day)
/// are ignored.
#[allow(clippy::cast_possible_truncation)]
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > EXCEL_MAX_SERIAL {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Convert the fractional part of an Excel serial to a time of day, rounded
/// to the second.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn excel_fraction_to_time(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let seconds = (serial.fract() * 86_400.0).round() as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// `YYYY-MM` key of a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parse a month as `YYYY-MM`, or any accepted date form reduced to its month.
pub fn parse_month(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if let Some((year, month)) = trimmed.split_once('-') {
        if year.len() == 4 && (1..=2).contains(&month.len()) {
            if let (Ok(y), Ok(m)) = (year.parse::<i32>(), month.parse::<u32>()) {
                return NaiveDate::from_ymd_opt(y, m, 1).map(month_key);
            }
        }
    }
    parse_date(trimmed).map(month_key)
}

/// Normalize any stored date or timestamp to its `YYYY-MM-DD` key.
pub fn day_key_of(text: &str) -> Option<String> {
    parse_date(text).map(|d| d.format("%Y-%m-%d").to_string())
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_first.and_then(|d| d.pred_opt()).unwrap_or(first);
    (first, last)
}

/// Month keys of the `count` months ending with the month of `today`,
/// oldest first.
pub fn recent_month_keys(today: NaiveDate, count: usize) -> Vec<String> {
    let mut keys = Vec::with_capacity(count);
    let mut cursor = today.with_day(1).unwrap_or(today);
    for _ in 0..count {
        keys.push(month_key(cursor));
        cursor = match cursor.pred_opt() {
            Some(prev) => prev.with_day(1).unwrap_or(prev),
            None => break,
        };
    }
    keys.reverse();
    keys
}
