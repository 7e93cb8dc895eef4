//! Daily activity schedule
//!
//! Which field worker does which activity (reading, delivery, review) on
//! which cycle each day. A worker has at most one assignment per day, so
//! both the form and imports upsert on `(fecha, usuario_nombre)`.

use opsboard_domain::constants::{CREATED_AT_COLUMN, RECENT_MONTHS_WINDOW};
use opsboard_domain::{FieldSpec, FilterSpec, Record, SortKey};
use serde_json::{Map, Value};

use super::cycle_control::{cycle_control, MasterCycles};
use crate::report::{Breakdown, GroupBy, Schema};

const READING_CYCLES: &[&str] = &[
    "2", "4", "5", "6", "8", "10", "12", "14", "16", "18", "19", "20", "21", "22", "24", "26", "28",
    "29", "30", "32", "33", "34", "35", "36", "37", "38", "39", "40", "41", "44", "46", "47", "48",
    "49", "50", "51", "53", "55", "60", "61", "62", "63", "91",
];

/// Cycles each activity must cover during the month
pub const MASTER_CYCLES: &[MasterCycles] = &[
    MasterCycles { group: "lectura", cycles: READING_CYCLES },
    MasterCycles {
        group: "reparto",
        cycles: &[
            "02-102", "04-104", "05-104", "06-106", "08-108", "10-110", "12-112", "14-114",
            "16-116", "18-118", "19-118", "20-120", "21-120", "22-122", "24-124", "26-126",
            "28-128", "29-128", "30-130", "32-132", "33-134", "34-134", "35-134", "36-136",
            "37-134", "38-138", "39-134", "40-140", "41-140", "42", "44", "145", "46-146",
            "47-146", "48-148", "49-146", "50-150", "51-146", "53-146", "55-150", "60-160",
            "61-162", "62-162", "63-163",
        ],
    },
    MasterCycles { group: "revision", cycles: READING_CYCLES },
];

fn derive(record: &mut Record) {
    if let Some(activity) = record.text("actividad") {
        record.set("actividad", activity.trim().to_lowercase());
    }
}

fn is_assignment(record: &Record) -> bool {
    !record.is_blank("usuario_nombre") && !record.is_blank("actividad")
}

fn control_ciclos(records: &[Record]) -> Map<String, Value> {
    let mut extras = Map::new();
    extras.insert(
        "control_ciclos".into(),
        Value::Object(cycle_control(MASTER_CYCLES, records, "actividad", "ciclo")),
    );
    extras
}

pub static SCHEMA: Schema = Schema {
    table: "programacion_actividades",
    title: "Programación Diaria",
    fields: &[
        FieldSpec::date("fecha", "Fecha"),
        FieldSpec::text("usuario_nombre", "Usuario").aliases(&["usuario"]),
        FieldSpec::text("actividad", "Actividad"),
        FieldSpec::text("ciclo", "Ciclo").default_value("40"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", "fecha"),
        FilterSpec::at_most("fecha_hasta", "fecha"),
        FilterSpec::contains("usuario", "usuario_nombre"),
        FilterSpec::equals("actividad", "actividad").in_filename(""),
    ],
    sort: &[SortKey::desc("fecha"), SortKey::asc("actividad"), SortKey::desc(CREATED_AT_COLUMN)],
    natural_key: &["fecha", "usuario_nombre"],
    upsert_on_create: true,
    derive: Some(derive),
    import_gate: Some(is_assignment),
    breakdowns: &[
        Breakdown::count("por_actividad", GroupBy::Field("actividad")),
        Breakdown::count("por_dia", GroupBy::Day("fecha")),
        Breakdown::count("por_mes", GroupBy::Month("fecha")).last_keys(RECENT_MONTHS_WINDOW),
    ],
    extras: Some(control_ciclos),
    examples: &[
        &["2026-02-17", "Juan Pérez", "lectura", "40"],
        &["2026-02-17", "Ana Torres", "reparto", "40-140"],
    ],
    instructions: &[
        "Columnas: Fecha, Usuario, Actividad, Ciclo.",
        "Actividad: lectura, reparto o revision.",
        "Si el ciclo queda vacío se asigna el 40.",
        "Un usuario tiene una sola asignación por día; cargar de nuevo la reemplaza.",
        "Las filas sin usuario o actividad se omiten.",
    ],
    ..Schema::BASE
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_is_lower_cased() {
        let mut record = Record::new().with("actividad", " Reparto ");
        derive(&mut record);
        assert_eq!(record.text("actividad").as_deref(), Some("reparto"));
    }

    #[test]
    fn rows_need_user_and_activity() {
        assert!(is_assignment(&Record::new().with("usuario_nombre", "Ana").with("actividad", "lectura")));
        assert!(!is_assignment(&Record::new().with("usuario_nombre", "Ana").with("actividad", "")));
        assert!(!is_assignment(&Record::new().with("actividad", "lectura")));
    }

    #[test]
    fn control_is_per_activity() {
        let records = vec![
            Record::new().with("actividad", "lectura").with("ciclo", "40"),
            Record::new().with("actividad", "reparto").with("ciclo", "40-140"),
        ];
        let extras = control_ciclos(&records);
        let control = &extras["control_ciclos"];
        assert_eq!(control["lectura"]["procesados"], 1);
        assert_eq!(control["revision"]["procesados"], 0);
        assert_eq!(control["reparto"]["total"], 44);
        assert_eq!(control["reparto"]["procesados"], 1);
    }
}
