//! Processed cycles and generated orders
//!
//! Daily count of accounts processed per cycle (water and energy) plus the
//! orders generated per cause. A spreadsheet can be loaded twice for the same
//! day and cycle, first with processing counts and later with causes: rows
//! are upserted on `(fecha_procesamiento, ciclo)`.

use std::collections::BTreeMap;

use opsboard_domain::constants::{CREATED_AT_COLUMN, RECENT_DAYS_WINDOW, RECENT_MONTHS_WINDOW};
use opsboard_domain::utils::dates::parse_month;
use opsboard_domain::{FieldSpec, FilterSpec, Record, SortKey};
use serde_json::{json, Map, Value};

use crate::report::derive::saturating_sum;
use crate::report::{Breakdown, GroupBy, Schema, Total};

const DATE: &str = "fecha_procesamiento";

const PROCESSED_COLUMNS: &[&str] = &["cantidad_acueducto", "cantidad_energia"];

/// Cause columns plus the action-line count; their sum is `total_ordenes_causa`.
pub const ORDER_COLUMNS: &[&str] = &[
    "causa_13",
    "causa_15",
    "causa_16",
    "causa_34",
    "causa_36",
    "causa_37",
    "causa_58",
    "causa_71",
    "linea_accion",
];

/// Per-cause order counts for the latest month with data against the month
/// before it.
fn cause_comparison(records: &[Record]) -> Map<String, Value> {
    let mut by_month: BTreeMap<String, Vec<&Record>> = BTreeMap::new();
    for record in records {
        if let Some(month) = record.text(DATE).and_then(|d| parse_month(&d)) {
            by_month.entry(month).or_default().push(record);
        }
    }
    let mut months = by_month.keys().rev();
    let current = months.next().cloned();
    let previous = months.next().cloned();

    let sum = |month: &Option<String>, column: &str| -> i64 {
        month
            .as_ref()
            .and_then(|m| by_month.get(m))
            .map_or(0, |rows| saturating_sum(rows.iter().map(|r| r.int(column))))
    };
    let causes: Vec<Value> = ORDER_COLUMNS
        .iter()
        .map(|column| {
            json!({
                "causa": column,
                "actual": sum(&current, column),
                "anterior": sum(&previous, column),
            })
        })
        .collect();

    let mut extras = Map::new();
    extras.insert(
        "comparativo_causas".into(),
        json!({ "mes_actual": current, "mes_anterior": previous, "causas": causes }),
    );
    extras
}

pub static SCHEMA: Schema = Schema {
    table: "ciclos_procesados",
    title: "Ciclos Procesados",
    fields: &[
        FieldSpec::date(DATE, "Fecha").required(),
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::int("cantidad_acueducto", "Acueducto"),
        FieldSpec::int("cantidad_energia", "Energía"),
        FieldSpec::int("total_procesado", "Total Procesado").server(),
        FieldSpec::int("causa_13", "Causa 13"),
        FieldSpec::int("causa_15", "Causa 15"),
        FieldSpec::int("causa_16", "Causa 16"),
        FieldSpec::int("causa_34", "Causa 34"),
        FieldSpec::int("causa_36", "Causa 36"),
        FieldSpec::int("causa_37", "Causa 37"),
        FieldSpec::int("causa_58", "Causa 58"),
        FieldSpec::int("causa_71", "Causa 71"),
        FieldSpec::int("linea_accion", "Línea Acción"),
        FieldSpec::int("total_ordenes_causa", "Total Órdenes").server(),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", DATE),
        FilterSpec::at_most("fecha_hasta", DATE),
        FilterSpec::contains("ciclo", "ciclo").in_filename("ciclo_"),
    ],
    sort: &[SortKey::desc(DATE), SortKey::desc(CREATED_AT_COLUMN)],
    natural_key: &[DATE, "ciclo"],
    totals: &[
        Total::new("total_procesado", PROCESSED_COLUMNS),
        Total::new("total_ordenes_causa", ORDER_COLUMNS),
        Total::new("cantidad_acueducto", &["cantidad_acueducto"]),
        Total::new("cantidad_energia", &["cantidad_energia"]),
    ],
    breakdowns: &[
        Breakdown::count("registros_por_dia", GroupBy::Day(DATE)).last_days(RECENT_DAYS_WINDOW),
        Breakdown::count("registros_por_mes", GroupBy::Month(DATE))
            .last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::sum("ordenes_por_mes", GroupBy::Month(DATE), ORDER_COLUMNS)
            .last_keys(RECENT_MONTHS_WINDOW),
    ],
    extras: Some(cause_comparison),
    examples: &[
        &["2026-02-17", "40", "150", "200", "5", "3", "2", "1", "0", "4", "2", "1", "2"],
        &["2026-02-18", "42", "80", "120", "2", "1", "0", "0", "1", "2", "0", "0", "0"],
    ],
    instructions: &[
        "Formato de fecha: AAAA-MM-DD (ej: 2026-02-17). La fecha es obligatoria.",
        "Campos numéricos: solo números enteros (sin decimales).",
        "Los totales se calculan automáticamente.",
        "Puede cargar primero los datos de procesamiento (causas en 0) y luego otro archivo \
         con las causas para la misma fecha y ciclo; se actualizarán sin duplicar.",
    ],
    ..Schema::BASE
};

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, c13: i64) -> Record {
        Record::new().with(DATE, date).with("causa_13", c13).with("linea_accion", 1)
    }

    #[test]
    fn compares_latest_month_with_previous() {
        let records =
            vec![row("2026-02-03", 4), row("2026-02-10", 1), row("2026-01-20", 7), row("2025-12-01", 9)];
        let extras = cause_comparison(&records);
        let comparison = &extras["comparativo_causas"];
        assert_eq!(comparison["mes_actual"], "2026-02");
        assert_eq!(comparison["mes_anterior"], "2026-01");
        assert_eq!(comparison["causas"][0], json!({"causa": "causa_13", "actual": 5, "anterior": 7}));
        assert_eq!(comparison["causas"][8]["actual"], 2);
    }

    #[test]
    fn single_month_has_no_previous() {
        let extras = cause_comparison(&[row("2026-02-03", 4)]);
        assert_eq!(extras["comparativo_causas"]["mes_anterior"], Value::Null);
        assert_eq!(extras["comparativo_causas"]["causas"][0]["anterior"], 0);
    }
}
