//! Digital invoice dispatch results
//!
//! Monthly counts of e-mailed invoices per cycle broken down by delivery
//! outcome. One row per `(ciclo_id, mes_trabajo)`: creating or importing a
//! row for an existing pair overwrites it.

use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::{FieldSpec, FilterSpec, Record, SortKey};

use crate::report::{Breakdown, DefaultPeriod, GroupBy, Schema, Total};

/// Outcome columns in template order
pub const RESULT_COLUMNS: &[&str] = &[
    "buzones_inactivo",
    "buzones_lleno",
    "buzones_no_existe",
    "correo_mal_escrito",
    "dominio_no_existe",
    "enviados",
    "rechazado_varios_intentos",
    "reporta_spam",
    "sin_adjunto",
    "servidor_destino_no_responde",
];

fn has_cycle(record: &Record) -> bool {
    record.int("ciclo_id") > 0
}

pub static SCHEMA: Schema = Schema {
    table: "resultados_digitales",
    title: "Resultados Digitales",
    fields: &[
        FieldSpec::int("ciclo_id", "Ciclo").required(),
        FieldSpec::date("mes_trabajo", "Mes Trabajo").required(),
        FieldSpec::int("buzones_inactivo", "Buzón inactivo"),
        FieldSpec::int("buzones_lleno", "Buzón lleno"),
        FieldSpec::int("buzones_no_existe", "Buzón no existe"),
        FieldSpec::int("correo_mal_escrito", "Correo mal escrito"),
        FieldSpec::int("dominio_no_existe", "Dominio no existe"),
        FieldSpec::int("enviados", "Enviados"),
        FieldSpec::int("rechazado_varios_intentos", "Rechazado varios intentos"),
        FieldSpec::int("reporta_spam", "Reporta como spam"),
        FieldSpec::int("sin_adjunto", "Sin adjunto"),
        FieldSpec::int("servidor_destino_no_responde", "Servidor destino no responde"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", "mes_trabajo"),
        FilterSpec::at_most("fecha_hasta", "mes_trabajo"),
        FilterSpec::equals("ciclo", "ciclo_id").period().in_filename("ciclo_"),
    ],
    sort: &[SortKey::desc("mes_trabajo"), SortKey::desc(CREATED_AT_COLUMN)],
    natural_key: &["ciclo_id", "mes_trabajo"],
    upsert_on_create: true,
    import_gate: Some(has_cycle),
    totals: &[Total::new("total_resultados", RESULT_COLUMNS), Total::new("enviados", &["enviados"])],
    breakdowns: &[
        Breakdown::sum("por_ciclo", GroupBy::Field("ciclo_id"), RESULT_COLUMNS).numeric_keys(),
        Breakdown::field_set("por_resultado", RESULT_COLUMNS),
    ],
    default_period: DefaultPeriod::CurrentMonth { from: "fecha_desde", to: "fecha_hasta" },
    examples: &[
        &["40", "2026-02-01", "5", "2", "1", "0", "3", "120", "4", "2", "1", "0"],
        &["42", "2026-02-01", "2", "1", "0", "1", "2", "85", "1", "0", "1", "1"],
    ],
    instructions: &[
        "Una fila por ciclo y mes de trabajo.",
        "Mes Trabajo es el primer día del mes (AAAA-MM-DD) o el mes (AAAA-MM).",
        "Las filas sin ciclo se omiten.",
        "Si el ciclo y el mes ya existen, la fila se actualiza.",
    ],
    ..Schema::BASE
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_without_a_cycle_are_gated() {
        assert!(has_cycle(&Record::new().with("ciclo_id", 40)));
        assert!(!has_cycle(&Record::new().with("ciclo_id", 0)));
        assert!(!has_cycle(&Record::new()));
    }

    #[test]
    fn fields_follow_template_order() {
        let names: Vec<_> = SCHEMA.fields.iter().map(|f| f.name).collect();
        assert_eq!(&names[..2], &["ciclo_id", "mes_trabajo"]);
        assert_eq!(&names[2..], RESULT_COLUMNS);
    }
}
