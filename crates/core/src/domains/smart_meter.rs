//! Smart-meter (AMI) dispatch reports
//!
//! One row per cycle and billing month with the number of readings sent to
//! the meter platform and how many came back through integration or manual
//! recovery. Shortfall and percentages are recomputed on every write and
//! over the period totals.

use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::{FieldSpec, FilterSpec, Record, SortKey};

use crate::report::derive::{percentage, shortfall};
use crate::report::{Breakdown, GroupBy, Schema, Total};

const SENT: &str = "total_enviados";
const INTEGRATED: &str = "total_integracion";
const RECOVERED: &str = "total_recuperados";
const WITHOUT_ACTION: &str = "total_sin_accion";

/// Recompute the shortfall and the three percentages over `total_enviados`.
pub fn derive(record: &mut Record) {
    let without_action =
        shortfall(record.int(SENT), record.int(INTEGRATED), record.int(RECOVERED));
    record.set(WITHOUT_ACTION, without_action);
    percentages(record);
}

/// Percentages of an already-summed row; the shortfall is kept as summed.
pub fn percentages(record: &mut Record) {
    let sent = record.int(SENT);
    for (column, part) in [
        ("porcentaje_integracion", INTEGRATED),
        ("porcentaje_recuperados", RECOVERED),
        ("porcentaje_sin_lectura", WITHOUT_ACTION),
    ] {
        let value = percentage(record.int(part), sent);
        record.set(column, value);
    }
}

pub static SCHEMA: Schema = Schema {
    table: "ami_reportes",
    title: "Reportes AMI",
    fields: &[
        FieldSpec::int("ciclo", "Ciclo").required(),
        FieldSpec::month("mes_vigencia", "Mes Vigencia").required(),
        FieldSpec::date("fecha_reporte", "Fecha Reporte"),
        FieldSpec::int(SENT, "Total Enviados"),
        FieldSpec::int(INTEGRATED, "Total Integración"),
        FieldSpec::int(RECOVERED, "Total Recuperados"),
        FieldSpec::text("archivo_enviados", "Archivo Enviados"),
        FieldSpec::text("archivo_integracion", "Archivo Integración"),
        FieldSpec::text("archivo_recuperados", "Archivo Recuperados"),
        FieldSpec::text("observaciones", "Observaciones"),
        FieldSpec::int(WITHOUT_ACTION, "Sin Acción").derived(),
        FieldSpec::decimal("porcentaje_integracion", "% Integración").derived(),
        FieldSpec::decimal("porcentaje_recuperados", "% Recuperados").derived(),
        FieldSpec::decimal("porcentaje_sin_lectura", "% Sin Lectura").derived(),
    ],
    filters: &[
        FilterSpec::at_least("mes_desde", "mes_vigencia"),
        FilterSpec::at_most("mes_hasta", "mes_vigencia"),
        FilterSpec::equals("ciclo", "ciclo").period().in_filename("ciclo_"),
    ],
    sort: &[SortKey::desc("mes_vigencia"), SortKey::desc(CREATED_AT_COLUMN)],
    derive: Some(derive),
    derive_totals: Some(percentages),
    totals: &[
        Total::new(SENT, &[SENT]),
        Total::new(INTEGRATED, &[INTEGRATED]),
        Total::new(RECOVERED, &[RECOVERED]),
        Total::new(WITHOUT_ACTION, &[WITHOUT_ACTION]),
    ],
    breakdowns: &[
        Breakdown::sum("enviados_por_ciclo", GroupBy::Field("ciclo"), &[SENT]).numeric_keys(),
        Breakdown::sum("integracion_por_ciclo", GroupBy::Field("ciclo"), &[INTEGRATED])
            .numeric_keys(),
        Breakdown::sum("recuperados_por_ciclo", GroupBy::Field("ciclo"), &[RECOVERED])
            .numeric_keys(),
        Breakdown::sum("sin_accion_por_ciclo", GroupBy::Field("ciclo"), &[WITHOUT_ACTION])
            .numeric_keys(),
        Breakdown::sum("enviados_por_mes", GroupBy::Month("mes_vigencia"), &[SENT]),
    ],
    examples: &[
        &[
            "40",
            "2026-02",
            "2026-02-17",
            "1500",
            "1200",
            "250",
            "Enviados_40.xlsx",
            "Integracion_40.xlsx",
            "Recuperados_40.xlsx",
            "Reporte normal",
        ],
        &[
            "42",
            "2026-02",
            "2026-02-18",
            "800",
            "600",
            "150",
            "Enviados_42.xlsx",
            "Integracion_42.xlsx",
            "Recuperados_42.xlsx",
            "Sin novedad",
        ],
    ],
    instructions: &[
        "Una fila por ciclo y mes de vigencia.",
        "Ciclo y Mes Vigencia (AAAA-MM) son obligatorios.",
        "Sin Acción y los porcentajes se calculan automáticamente.",
        "Las fechas pueden escribirse como AAAA-MM-DD o DD/MM/AAAA.",
    ],
    ..Schema::BASE
};
