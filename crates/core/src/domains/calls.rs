//! Outbound call log
//!
//! Calls made to schedule or confirm field visits. Spreadsheets come from the
//! call-center export with upper-case headers, accepted as aliases.

use opsboard_domain::constants::{CREATED_AT_COLUMN, RECENT_DAYS_WINDOW, RECENT_MONTHS_WINDOW, TOP_N};
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Rule, Schema};

const DATE: &str = "fecha_gestion";

pub static SCHEMA: Schema = Schema {
    table: "llamadas",
    title: "Llamadas",
    fields: &[
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("orden", "Orden"),
        FieldSpec::text("cliente", "Cliente"),
        FieldSpec::text("nombre_reclamante", "Nombre Reclamante")
            .aliases(&["NOMBRE DEL RECLAMANTE"]),
        FieldSpec::text("telefono", "Teléfono"),
        FieldSpec::date("fecha_visita_programada", "Fecha Visita Prog.")
            .aliases(&["FECHA DE VISITA PROGRAMADA"])
            .nullable(),
        FieldSpec::text("servicio", "Servicio"),
        FieldSpec::date(DATE, "Fecha Gestión").aliases(&["FECHA DE GESTION"]),
        FieldSpec::text("gestor", "Gestor"),
        FieldSpec::text("nombre_suscriptor", "Nombre Suscriptor"),
        FieldSpec::text("direccion_predio", "Dirección Predio"),
        FieldSpec::date("fecha_llamada", "Fecha Llamada")
            .aliases(&["FECHA DE LLAMADA"])
            .nullable(),
        FieldSpec::time("hora_primera_llamada", "Hora 1ª Llamada")
            .aliases(&["HORA PRIMERA LLAMADA"]),
        FieldSpec::time("hora_segunda_llamada", "Hora 2ª Llamada")
            .aliases(&["HORA SEGUNDA LLAMADA"]),
        FieldSpec::text("persona_atiende", "Persona Atiende").aliases(&["PERSONA QUE ATIENDE"]),
        FieldSpec::text("resultado_llamada", "Resultado").aliases(&["RESULTADO LLAMADA"]),
        FieldSpec::text("comentario", "Comentario"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", DATE),
        FilterSpec::at_most("fecha_hasta", DATE),
        FilterSpec::contains("ciclo", "ciclo").in_filename("ciclo_"),
        FilterSpec::contains("gestor", "gestor"),
        FilterSpec::equals("resultado", "resultado_llamada"),
    ],
    sort: &[SortKey::desc(DATE), SortKey::desc(CREATED_AT_COLUMN)],
    rules: &[Rule::AnyOf {
        columns: &["cliente", "nombre_reclamante"],
        message: "Debe ingresar al menos cliente o nombre del reclamante",
    }],
    breakdowns: &[
        Breakdown::count("por_dia", GroupBy::Day(DATE)).last_days(RECENT_DAYS_WINDOW),
        Breakdown::count("por_mes", GroupBy::Month(DATE)).last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::count("por_resultado", GroupBy::Field("resultado_llamada")),
        Breakdown::count("por_gestor", GroupBy::Field("gestor")).top(TOP_N),
    ],
    examples: &[
        &[
            "40",
            "ORD-001",
            "Cliente Ejemplo S.A.S.",
            "Juan Pérez",
            "3001234567",
            "2026-02-17",
            "Telecomunicaciones",
            "2026-02-17",
            "Gestor 1",
            "María Gómez",
            "Calle 123 #45-67",
            "2026-02-17",
            "10:30",
            "11:15",
            "Juan Pérez",
            "Contestó",
            "Cliente informó que pagará la próxima semana",
        ],
        &[
            "42",
            "ORD-002",
            "Empresa XYZ",
            "Carlos Rodríguez",
            "3107654321",
            "2026-02-18",
            "Servicios Públicos",
            "2026-02-18",
            "Gestor 3",
            "Ana Martínez",
            "Carrera 50 #20-30",
            "2026-02-18",
            "09:00",
            "",
            "Secretaria",
            "No contestó",
            "Se dejó mensaje en contestadora",
        ],
    ],
    instructions: &[
        "Fechas en formato AAAA-MM-DD (ej: 2026-02-17); la fecha de llamada es opcional.",
        "Horas en formato HH:MM de 24 horas (ej: 14:30); deje vacía la segunda llamada si no aplica.",
        "Debe ingresar al menos Cliente o Nombre Reclamante.",
        "No modifique los encabezados de columna.",
    ],
    ..Schema::BASE
};
