//! Static per-domain schema
//!
//! A `Schema` is everything the generic report unit needs to know about one
//! table: its columns, how filter keys map to predicates, how rows are
//! validated, derived, keyed and stamped, and which aggregates the dashboard
//! shows for it. Every domain declares one as a `static`.

use chrono::NaiveDate;
use opsboard_domain::constants::{
    CREATED_AT_COLUMN, CREATOR_ID_COLUMN, CREATOR_NAME_COLUMN, OWNER_COLUMN,
};
use opsboard_domain::utils::dates::month_bounds;
use opsboard_domain::{FieldKind, FieldSpec, Filter, FilterSpec, Record, SortKey};
use serde_json::{Map, Value};

/// Recomputes client-derived columns in place
pub type DeriveFn = fn(&mut Record);

/// Decides whether an imported row is kept
pub type GateFn = fn(&Record) -> bool;

/// Domain-specific aggregate sections computed from the period set
pub type ExtrasFn = fn(&[Record]) -> Map<String, Value>;

/// Cross-field check run by the editor and the importer
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// At least one of the columns must be non-blank
    AnyOf { columns: &'static [&'static str], message: &'static str },
    /// `sum(parts) <= sum(limit)`
    SumAtMost {
        parts: &'static [&'static str],
        limit: &'static [&'static str],
        message: &'static str,
    },
}

/// How a write records who made it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorStamp {
    /// `creado_por_id` + `creado_por_nombre`
    IdAndName,
    /// `user_id` only
    Owner,
}

impl CreatorStamp {
    /// Extra export columns appended after the schema fields.
    pub fn export_columns(self) -> &'static [(&'static str, &'static str, FieldKind)] {
        match self {
            Self::IdAndName => &[
                (CREATED_AT_COLUMN, "Creado", FieldKind::Timestamp),
                (CREATOR_NAME_COLUMN, "Creado Por", FieldKind::Text),
            ],
            Self::Owner => &[(CREATED_AT_COLUMN, "Creado", FieldKind::Timestamp)],
        }
    }

    /// Columns written by the stamp; never accepted from user input.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::IdAndName => &[CREATOR_ID_COLUMN, CREATOR_NAME_COLUMN],
            Self::Owner => &[OWNER_COLUMN],
        }
    }
}

/// Named sum over one or more numeric columns
#[derive(Debug, Clone, Copy)]
pub struct Total {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl Total {
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns }
    }
}

/// Filter values pre-filled when a view opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPeriod {
    /// Open unfiltered
    Unbounded,
    /// First and last day of the current month under the two keys
    CurrentMonth { from: &'static str, to: &'static str },
}

/// How rows are grouped into buckets
#[derive(Debug, Clone, Copy)]
pub enum GroupBy {
    /// Raw column value
    Field(&'static str),
    /// `YYYY-MM` of a date or month column
    Month(&'static str),
    /// `YYYY-MM-DD` of a date or timestamp column
    Day(&'static str),
    /// One bucket per listed column, labelled with the field label and
    /// summing that column
    FieldSet(&'static [&'static str]),
}

/// What each row contributes to its bucket
#[derive(Debug, Clone, Copy)]
pub enum Measure {
    Count,
    Sum(&'static [&'static str]),
}

/// Bucket ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketOrder {
    /// Numeric keys ascending, then non-numeric keys lexically
    NumericKey,
    /// Keys ascending
    Key,
    /// Value descending (ties by key), truncated to N
    TopByValue(usize),
    /// Order of the `FieldSet` columns
    Declared,
}

/// Restricts a breakdown to recent keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    All,
    /// Day keys no older than N days before today
    LastDays(i64),
    /// The last N keys after ordering
    LastKeys(usize),
}

/// One named chart series
#[derive(Debug, Clone, Copy)]
pub struct Breakdown {
    pub name: &'static str,
    pub group: GroupBy,
    pub measure: Measure,
    pub order: BucketOrder,
    pub window: Window,
}

impl Breakdown {
    pub const fn count(name: &'static str, group: GroupBy) -> Self {
        Self { name, group, measure: Measure::Count, order: BucketOrder::Key, window: Window::All }
    }

    pub const fn sum(name: &'static str, group: GroupBy, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            group,
            measure: Measure::Sum(columns),
            order: BucketOrder::Key,
            window: Window::All,
        }
    }

    /// Per-column sums in declaration order.
    pub const fn field_set(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name,
            group: GroupBy::FieldSet(columns),
            measure: Measure::Sum(columns),
            order: BucketOrder::Declared,
            window: Window::All,
        }
    }

    #[must_use]
    pub const fn numeric_keys(mut self) -> Self {
        self.order = BucketOrder::NumericKey;
        self
    }

    #[must_use]
    pub const fn top(mut self, n: usize) -> Self {
        self.order = BucketOrder::TopByValue(n);
        self
    }

    #[must_use]
    pub const fn last_days(mut self, days: i64) -> Self {
        self.window = Window::LastDays(days);
        self
    }

    #[must_use]
    pub const fn last_keys(mut self, keys: usize) -> Self {
        self.window = Window::LastKeys(keys);
        self
    }
}

/// Everything the report unit needs to know about one table
#[derive(Clone, Copy)]
pub struct Schema {
    pub table: &'static str,
    /// Sheet title used for exports
    pub title: &'static str,
    /// Columns in template order
    pub fields: &'static [FieldSpec],
    pub filters: &'static [FilterSpec],
    pub sort: &'static [SortKey],
    /// Upsert conflict columns for imports; empty means plain insert
    pub natural_key: &'static [&'static str],
    /// Editor creates also upsert on `natural_key`
    pub upsert_on_create: bool,
    /// Mobile-captured tables the dashboard only reads
    pub read_only: bool,
    pub stamp: CreatorStamp,
    pub rules: &'static [Rule],
    pub derive: Option<DeriveFn>,
    /// Applied to the aggregate totals row
    pub derive_totals: Option<DeriveFn>,
    pub import_gate: Option<GateFn>,
    pub totals: &'static [Total],
    pub breakdowns: &'static [Breakdown],
    pub extras: Option<ExtrasFn>,
    pub default_period: DefaultPeriod,
    /// Example rows for the import template, in field order
    pub examples: &'static [&'static [&'static str]],
    /// Lines of the template's instruction sheet
    pub instructions: &'static [&'static str],
}

impl Schema {
    /// Starting point for domain declarations (`..Schema::BASE`).
    pub const BASE: Schema = Schema {
        table: "",
        title: "",
        fields: &[],
        filters: &[],
        sort: &[SortKey::desc(CREATED_AT_COLUMN)],
        natural_key: &[],
        upsert_on_create: false,
        read_only: false,
        stamp: CreatorStamp::IdAndName,
        rules: &[],
        derive: None,
        derive_totals: None,
        import_gate: None,
        totals: &[],
        breakdowns: &[],
        extras: None,
        default_period: DefaultPeriod::Unbounded,
        examples: &[],
        instructions: &[],
    };

    pub fn field(&self, column: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == column)
    }

    pub fn filter(&self, key: &str) -> Option<&'static FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Columns users provide, in template order.
    pub fn input_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.is_input())
    }

    /// `(column, label, kind)` of every exported column.
    pub fn export_columns(&self) -> Vec<(&'static str, &'static str, FieldKind)> {
        let mut columns: Vec<_> = self.fields.iter().map(|f| (f.name, f.label, f.kind)).collect();
        columns.extend(
            self.stamp.export_columns().iter().copied().filter(|(c, _, _)| self.field(c).is_none()),
        );
        columns
    }

    /// Filter a view opens with on `today`.
    pub fn default_filter(&self, today: NaiveDate) -> Filter {
        match self.default_period {
            DefaultPeriod::Unbounded => Filter::new(),
            DefaultPeriod::CurrentMonth { from, to } => {
                let (first, last) = month_bounds(today);
                Filter::new()
                    .with(from, first.format("%Y-%m-%d").to_string())
                    .with(to, last.format("%Y-%m-%d").to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: Schema = Schema {
        table: "muestras",
        fields: &[FieldSpec::int("ciclo", "Ciclo"), FieldSpec::int("total", "Total").server()],
        default_period: DefaultPeriod::CurrentMonth { from: "fecha_desde", to: "fecha_hasta" },
        ..Schema::BASE
    };

    #[test]
    fn export_columns_append_creator_stamp() {
        let labels: Vec<_> = SAMPLE.export_columns().iter().map(|c| c.1).collect();
        assert_eq!(labels, vec!["Ciclo", "Total", "Creado", "Creado Por"]);
        assert_eq!(SAMPLE.input_fields().count(), 1);
    }

    #[test]
    fn default_filter_spans_current_month() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let filter = SAMPLE.default_filter(today);
        assert_eq!(filter.get("fecha_desde"), Some("2026-02-01"));
        assert_eq!(filter.get("fecha_hasta"), Some("2026-02-28"));
        assert!(Schema::BASE.default_filter(today).is_empty());
    }
}
