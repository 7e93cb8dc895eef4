//! Field review analysis
//!
//! Like cause analysis but for critical and complaint-driven reviews, with
//! an extra reading/observation count. The company split (Emcali,
//! Consorcio) and the conformity split are subsets of the reviewed total.

use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Rule, Schema, Total};

/// Columns that make up the reviewed total
pub const TOTAL_COLUMNS: &[&str] = &[
    "causa_13",
    "causa_15",
    "causa_16",
    "causa_34",
    "causa_36",
    "causa_37",
    "causa_58",
    "causa_71",
    "cantidad_lectura_observacion",
];

const COMPANY_COLUMNS: &[&str] = &["cantidad_emcali", "cantidad_consorcio"];
const CONFORMITY_COLUMNS: &[&str] = &["cantidad_conformes", "cantidad_inconsistencias"];

const BY_TYPE_COLUMNS: &[&str] = &[
    "causa_13",
    "causa_15",
    "causa_16",
    "causa_34",
    "causa_36",
    "causa_37",
    "causa_58",
    "causa_71",
    "cantidad_lectura_observacion",
    "cantidad_emcali",
    "cantidad_consorcio",
    "cantidad_conformes",
    "cantidad_inconsistencias",
];

pub static SCHEMA: Schema = Schema {
    table: "analisis_revisiones",
    title: "Análisis de Revisiones",
    fields: &[
        FieldSpec::date("fecha_revision", "Fecha Revisión"),
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("tipo_revision", "Tipo Revisión"),
        FieldSpec::int("causa_13", "Causa 13"),
        FieldSpec::int("causa_15", "Causa 15"),
        FieldSpec::int("causa_16", "Causa 16"),
        FieldSpec::int("causa_34", "Causa 34"),
        FieldSpec::int("causa_36", "Causa 36"),
        FieldSpec::int("causa_37", "Causa 37"),
        FieldSpec::int("causa_58", "Causa 58"),
        FieldSpec::int("causa_71", "Causa 71"),
        FieldSpec::int("cantidad_lectura_observacion", "Lectura/Obs"),
        FieldSpec::int("cantidad_emcali", "Emcali"),
        FieldSpec::int("cantidad_consorcio", "Consorcio"),
        FieldSpec::int("cantidad_conformes", "Conformes"),
        FieldSpec::int("cantidad_inconsistencias", "Inconsistencias"),
        FieldSpec::int("total_general", "Total General").server(),
        FieldSpec::text("analizado_por", "Analizado Por"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", "fecha_revision"),
        FilterSpec::at_most("fecha_hasta", "fecha_revision"),
        FilterSpec::contains("ciclo", "ciclo").period().in_filename("ciclo_"),
        FilterSpec::equals("gestor", "analizado_por").period().in_filename(""),
    ],
    sort: &[SortKey::desc("fecha_revision"), SortKey::desc(CREATED_AT_COLUMN)],
    rules: &[
        Rule::SumAtMost {
            parts: COMPANY_COLUMNS,
            limit: TOTAL_COLUMNS,
            message: "La suma de Emcali y Consorcio no puede ser mayor que el total de causas + lecturas",
        },
        Rule::SumAtMost {
            parts: CONFORMITY_COLUMNS,
            limit: TOTAL_COLUMNS,
            message: "La suma de Conformes e Inconsistencias no puede ser mayor que el total de causas + lecturas",
        },
    ],
    totals: &[Total::new("total_general", TOTAL_COLUMNS)],
    breakdowns: &[
        Breakdown::sum("por_ciclo", GroupBy::Field("ciclo"), TOTAL_COLUMNS).numeric_keys(),
        Breakdown::field_set("por_tipo", BY_TYPE_COLUMNS),
        Breakdown::sum("por_gestor", GroupBy::Field("analizado_por"), TOTAL_COLUMNS),
    ],
    examples: &[
        &[
            "2026-02-17", "40", "Critica", "5", "3", "2", "1", "0", "4", "2", "1", "10", "5", "3",
            "20", "2", "Gestor 1",
        ],
        &[
            "2026-02-18", "42", "Pqr", "2", "1", "0", "0", "1", "2", "0", "0", "8", "2", "1", "10",
            "3", "Gestor 2",
        ],
    ],
    instructions: &[
        "Formato de fechas: AAAA-MM-DD (ej: 2026-02-17).",
        "Tipo Revisión: Critica o Pqr.",
        "Total General es la suma de las causas más Lectura/Obs y se calcula automáticamente.",
        "Emcali + Consorcio y Conformes + Inconsistencias no pueden superar ese total.",
    ],
    ..Schema::BASE
};

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use opsboard_domain::Record;

    use super::*;
    use crate::report::normalize::normalize_form;
    use crate::report::validate::validate;

    fn reviewed(total: i64) -> Record {
        Record::new().with("causa_13", total).with("fecha_revision", "2026-02-17")
    }

    #[test]
    fn company_split_cannot_exceed_total() {
        let record = reviewed(5).with("cantidad_emcali", 4).with("cantidad_consorcio", 2);
        let err = validate(&SCHEMA, &record).unwrap_err();
        assert!(err.contains("Emcali"), "{err}");
        assert!(validate(&SCHEMA, &reviewed(6).with("cantidad_emcali", 6)).is_ok());
    }

    #[test]
    fn conformity_split_cannot_exceed_total() {
        let record = reviewed(1).with("cantidad_conformes", 2);
        assert!(validate(&SCHEMA, &record).unwrap_err().contains("Conformes"));
    }

    #[test]
    fn examples_respect_the_rules() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        for row in SCHEMA.examples {
            let form: Record = SCHEMA
                .input_fields()
                .zip(row.iter())
                .map(|(field, raw)| (field.name.to_string(), serde_json::Value::from(*raw)))
                .collect::<serde_json::Map<_, _>>()
                .into();
            let record = normalize_form(SCHEMA.input_fields(), &form, today).unwrap();
            assert!(validate(&SCHEMA, &record).is_ok());
        }
    }
}
