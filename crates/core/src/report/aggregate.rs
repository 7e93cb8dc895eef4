//! Folding a period-filtered record set into totals and chart series

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use opsboard_domain::utils::dates::{day_key_of, parse_month};
use opsboard_domain::{BreakdownResult, Bucket, Record, ReportStats};

use super::derive::saturating_sum;
use super::schema::{Breakdown, BucketOrder, GroupBy, Measure, Schema, Window};

/// Compute every total, breakdown and extra the schema declares.
pub fn compute(schema: &Schema, records: &[Record], today: NaiveDate) -> ReportStats {
    let mut totals = Record::new();
    for total in schema.totals {
        let sum = saturating_sum(records.iter().map(|r| sum_columns(r, total.columns)));
        totals.set(total.name, sum);
    }
    if let Some(derive) = schema.derive_totals {
        derive(&mut totals);
    }

    ReportStats {
        record_count: records.len() as u64,
        totals,
        breakdowns: schema
            .breakdowns
            .iter()
            .map(|b| breakdown(schema, b, records, today))
            .collect(),
        extras: schema.extras.map(|extras| extras(records)).unwrap_or_default(),
    }
}

fn sum_columns(record: &Record, columns: &[&str]) -> i64 {
    saturating_sum(columns.iter().map(|c| record.int(c)))
}

fn measure(record: &Record, measure: &Measure) -> i64 {
    match measure {
        Measure::Count => 1,
        Measure::Sum(columns) => sum_columns(record, columns),
    }
}

fn group_key(record: &Record, group: &GroupBy) -> Option<String> {
    match group {
        GroupBy::Field(column) => record.text(column),
        GroupBy::Month(column) => record.text(column).and_then(|v| parse_month(&v)),
        GroupBy::Day(column) => record.text(column).and_then(|v| day_key_of(&v)),
        GroupBy::FieldSet(_) => None,
    }
}

/// Compute one breakdown over `records`.
pub fn breakdown(
    schema: &Schema,
    spec: &Breakdown,
    records: &[Record],
    today: NaiveDate,
) -> BreakdownResult {
    let mut buckets = if let GroupBy::FieldSet(columns) = spec.group {
        columns
            .iter()
            .map(|column| {
                let label = schema.field(column).map_or(*column, |f| f.label);
                Bucket::new(label, saturating_sum(records.iter().map(|r| r.int(column))))
            })
            .collect()
    } else {
        let mut sums: BTreeMap<String, i64> = BTreeMap::new();
        for record in records {
            if let Some(key) = group_key(record, &spec.group) {
                let sum = sums.entry(key).or_default();
                *sum = sum.saturating_add(measure(record, &spec.measure));
            }
        }
        sums.into_iter().map(|(key, value)| Bucket { key, value }).collect::<Vec<_>>()
    };

    if let Window::LastDays(days) = spec.window {
        let cutoff = (today - Duration::days(days)).format("%Y-%m-%d").to_string();
        buckets.retain(|b| b.key >= cutoff);
    }

    match spec.order {
        BucketOrder::Key | BucketOrder::Declared => {}
        BucketOrder::NumericKey => buckets.sort_by(|a, b| numeric_key_order(&a.key, &b.key)),
        BucketOrder::TopByValue(n) => {
            buckets.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
            buckets.truncate(n);
        }
    }

    if let Window::LastKeys(n) = spec.window {
        let skip = buckets.len().saturating_sub(n);
        buckets.drain(..skip);
    }

    BreakdownResult { name: spec.name.to_string(), buckets }
}

/// Numbers first in numeric order, then everything else as text.
pub(crate) fn numeric_key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
