//! Field, filter and sort descriptors shared by every domain schema

use serde::Serialize;

/// Storage kind of a column, used for coercion and export rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM`
    Month,
    /// `HH:MM`
    Time,
    /// Backend timestamp, never written by the client
    Timestamp,
    /// Embedded JSON document
    Json,
}

crate::impl_domain_status_conversions!(FieldKind {
    Integer => "integer",
    Decimal => "decimal",
    Text => "text",
    Date => "date",
    Month => "month",
    Time => "time",
    Timestamp => "timestamp",
    Json => "json",
});

impl FieldKind {
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

/// Who produces a column's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Typed by the user (form or spreadsheet)
    Input,
    /// Recomputed by the client from other fields on every write
    Derived,
    /// Computed by the backend; read and exported, never sent
    Server,
}

/// One column of a domain table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human label used for export headers and import templates
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub origin: FieldOrigin,
    /// Extra header spellings accepted on import
    pub aliases: &'static [&'static str],
    /// Raw value used when the input leaves the column blank
    pub default: Option<&'static str>,
    /// Blank dates stay null instead of defaulting to today
    pub nullable: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            origin: FieldOrigin::Input,
            aliases: &[],
            default: None,
            nullable: false,
        }
    }

    pub const fn int(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub const fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Decimal)
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub const fn month(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Month)
    }

    pub const fn time(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Time)
    }

    pub const fn timestamp(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Timestamp).server()
    }

    pub const fn json(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Json)
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn derived(mut self) -> Self {
        self.origin = FieldOrigin::Derived;
        self
    }

    #[must_use]
    pub const fn server(mut self) -> Self {
        self.origin = FieldOrigin::Server;
        self
    }

    #[must_use]
    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, raw: &'static str) -> Self {
        self.default = Some(raw);
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Whether users provide this column through the form or a spreadsheet.
    pub const fn is_input(&self) -> bool {
        matches!(self.origin, FieldOrigin::Input)
    }
}

/// Comparison applied by a filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// `column >= value`
    AtLeast,
    /// `column <= value`
    AtMost,
    /// `column <= value` widened to the last instant of that day
    UntilEndOfDay,
    /// Exact match
    Equals,
    /// Case-insensitive substring match
    Contains,
}

impl FilterOp {
    pub const fn is_lower_bound(self) -> bool {
        matches!(self, Self::AtLeast)
    }

    pub const fn is_upper_bound(self) -> bool {
        matches!(self, Self::AtMost | Self::UntilEndOfDay)
    }
}

/// Maps a user-facing filter key to a column predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub key: &'static str,
    pub column: &'static str,
    pub op: FilterOp,
    /// Also scopes the aggregates
    pub period: bool,
    /// Contributes `_{prefix}{value}` to export filenames
    pub filename_prefix: Option<&'static str>,
}

impl FilterSpec {
    const fn new(key: &'static str, column: &'static str, op: FilterOp, period: bool) -> Self {
        Self { key, column, op, period, filename_prefix: None }
    }

    /// Lower date bound; always a period predicate.
    pub const fn at_least(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOp::AtLeast, true)
    }

    /// Upper date bound; always a period predicate.
    pub const fn at_most(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOp::AtMost, true)
    }

    /// Upper bound on a timestamp column, inclusive of the whole day.
    pub const fn until_end_of_day(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOp::UntilEndOfDay, true)
    }

    pub const fn equals(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOp::Equals, false)
    }

    pub const fn contains(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOp::Contains, false)
    }

    #[must_use]
    pub const fn period(mut self) -> Self {
        self.period = true;
        self
    }

    #[must_use]
    pub const fn in_filename(mut self, prefix: &'static str) -> Self {
        self.filename_prefix = Some(prefix);
        self
    }
}

/// One `order=` term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub column: &'static str,
    pub descending: bool,
}

impl SortKey {
    pub const fn desc(column: &'static str) -> Self {
        Self { column, descending: true }
    }

    pub const fn asc(column: &'static str) -> Self {
        Self { column, descending: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose_in_const_context() {
        const FIELD: FieldSpec = FieldSpec::int("ciclo", "Ciclo").required().aliases(&["CICLO ID"]);
        assert!(FIELD.required);
        assert!(FIELD.is_input());
        assert_eq!(FIELD.aliases, &["CICLO ID"]);
        assert!(!FieldSpec::timestamp("created_at", "Creado").is_input());

        const PACKAGES: FieldSpec = FieldSpec::json("paquetes", "Paquetes").default_value("[]");
        assert_eq!(PACKAGES.default, Some("[]"));
        assert!(FieldSpec::date("fecha_llamada", "Fecha").nullable().nullable);
    }

    #[test]
    fn bounds_are_period_predicates() {
        assert!(FilterSpec::at_least("fecha_desde", "fecha").period);
        assert!(FilterSpec::until_end_of_day("fecha_hasta", "created_at").op.is_upper_bound());
        assert!(!FilterSpec::contains("gestor", "gestor").period);
        assert!(FilterSpec::equals("ciclo", "ciclo").period().period);
    }
}
