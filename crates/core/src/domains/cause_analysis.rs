//! Cause analysis per cycle
//!
//! Counts of anomalous readings classified under each reading-cause code.
//! `total_general` is computed by the backend.

use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Schema, Total};

pub const CAUSE_COLUMNS: &[&str] = &[
    "causa_13", "causa_15", "causa_16", "causa_34", "causa_36", "causa_37", "causa_58", "causa_71",
];

pub static SCHEMA: Schema = Schema {
    table: "analisis_causas",
    title: "Análisis de Causas",
    fields: &[
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::int("causa_13", "Causa 13"),
        FieldSpec::int("causa_15", "Causa 15"),
        FieldSpec::int("causa_16", "Causa 16"),
        FieldSpec::int("causa_34", "Causa 34"),
        FieldSpec::int("causa_36", "Causa 36"),
        FieldSpec::int("causa_37", "Causa 37"),
        FieldSpec::int("causa_58", "Causa 58"),
        FieldSpec::int("causa_71", "Causa 71"),
        FieldSpec::int("total_general", "Total General").server(),
        FieldSpec::text("analizado_por", "Analizado Por"),
        FieldSpec::date("fecha_analisis", "Fecha Análisis"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", "fecha_analisis"),
        FilterSpec::at_most("fecha_hasta", "fecha_analisis"),
        FilterSpec::contains("ciclo", "ciclo").period().in_filename("ciclo_"),
        FilterSpec::equals("gestor", "analizado_por").period().in_filename(""),
    ],
    sort: &[SortKey::desc("fecha_analisis"), SortKey::desc(CREATED_AT_COLUMN)],
    totals: &[Total::new("total_general", CAUSE_COLUMNS)],
    breakdowns: &[
        Breakdown::sum("por_ciclo", GroupBy::Field("ciclo"), CAUSE_COLUMNS).numeric_keys(),
        Breakdown::field_set("por_causa", CAUSE_COLUMNS),
        Breakdown::sum("por_gestor", GroupBy::Field("analizado_por"), CAUSE_COLUMNS),
    ],
    examples: &[
        &["40", "5", "3", "2", "1", "0", "4", "2", "1", "Gestor 1", "2026-02-17"],
        &["42", "2", "1", "0", "0", "1", "2", "0", "0", "Gestor 2", "2026-02-18"],
    ],
    instructions: &[
        "Formato de fechas: AAAA-MM-DD (ej: 2026-02-17).",
        "Campos numéricos: solo números enteros.",
        "Total General se calcula automáticamente.",
    ],
    ..Schema::BASE
};
