//! Customer claims received by the reading office
//!
//! Claim spreadsheets carry no date column; imported rows are dated today.

use opsboard_domain::constants::{
    CREATED_AT_COLUMN, RECENT_DAYS_WINDOW, RECENT_MONTHS_WINDOW, TOP_N,
};
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Schema};

const DATE: &str = "fecha_reclamo";

pub static SCHEMA: Schema = Schema {
    table: "reclamos",
    title: "Reclamos",
    fields: &[
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("contrato", "Contrato"),
        FieldSpec::text("telecomunicaciones", "Telecomunicaciones"),
        FieldSpec::text("servicios_publicos", "Servicios Públicos"),
        FieldSpec::text("nombre", "Nombre").required(),
        FieldSpec::text("contacto", "Contacto"),
        FieldSpec::text("direccion_reclamo", "Dirección del Reclamo"),
        FieldSpec::text("ruta", "Ruta"),
        FieldSpec::text("consecutivos", "Consecutivos"),
        FieldSpec::text("digital", "Digital"),
        FieldSpec::text("medio_recepcion", "Medio de Recepción")
            .aliases(&["MEDIO DE RECEPCION RECLAMO"]),
        FieldSpec::text("motivo", "Motivo"),
        FieldSpec::text("gestion", "Gestión"),
        FieldSpec::text("observacion_reclamo", "Observación Reclamo"),
        FieldSpec::text("causal", "Causal"),
        FieldSpec::text("gestion_realizada", "Gestión Realizada"),
        FieldSpec::text("justificacion", "Justificación"),
        FieldSpec::date(DATE, "Fecha"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", DATE),
        FilterSpec::at_most("fecha_hasta", DATE),
        FilterSpec::contains("ciclo", "ciclo").in_filename("ciclo_"),
        FilterSpec::contains("nombre", "nombre"),
    ],
    sort: &[SortKey::desc(DATE), SortKey::desc(CREATED_AT_COLUMN)],
    breakdowns: &[
        Breakdown::count("por_dia", GroupBy::Day(DATE)).last_days(RECENT_DAYS_WINDOW),
        Breakdown::count("por_mes", GroupBy::Month(DATE)).last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::count("por_motivo", GroupBy::Field("motivo")).top(TOP_N),
    ],
    examples: &[&[
        "40",
        "1234567",
        "",
        "X",
        "María Gómez",
        "3001234567",
        "Calle 10 #5-20",
        "40-015",
        "120-125",
        "No",
        "WhatsApp",
        "Facturación",
        "Revisión en sitio",
        "Cliente reporta lectura alta",
        "Error humano",
        "Se corrigió la lectura",
        "Lectura mal digitada",
        "2026-02-17",
    ]],
    instructions: &[
        "Nombre es obligatorio.",
        "Si la columna Fecha no se incluye, el reclamo queda con la fecha de hoy.",
    ],
    ..Schema::BASE
};
