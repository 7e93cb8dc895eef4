//! Address assignment and certification requests

use opsboard_domain::constants::{CREATED_AT_COLUMN, RECENT_DAYS_WINDOW, RECENT_MONTHS_WINDOW};
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Schema};

const DATE: &str = "fecha_recepcion";

pub static SCHEMA: Schema = Schema {
    table: "nomenclatura",
    title: "Nomenclatura",
    fields: &[
        FieldSpec::date(DATE, "Fecha Recepción"),
        FieldSpec::text("tipo", "Tipo"),
        FieldSpec::text("zona_visitar", "Zona a Visitar"),
        FieldSpec::date("fecha_visita", "Fecha Visita").nullable(),
        FieldSpec::text("nombres_solicitante", "Nombres Solicitante").required(),
        FieldSpec::text("cedula", "Cédula"),
        FieldSpec::text("lugar_expedicion", "Lugar Expedición"),
        FieldSpec::text("telefono", "Teléfono"),
        FieldSpec::text("documento", "Documento"),
        FieldSpec::text("contrato_vecino", "Contrato Vecino"),
        FieldSpec::text("ruta_consecutivo", "Ruta/Consecutivo"),
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("direccion_asignada", "Dirección Asignada"),
        FieldSpec::text("tipo_soporte", "Tipo Soporte"),
        FieldSpec::text("nota", "Nota"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", DATE),
        FilterSpec::at_most("fecha_hasta", DATE),
        FilterSpec::equals("tipo", "tipo").in_filename(""),
        FilterSpec::contains("zona", "zona_visitar"),
        FilterSpec::contains("ciclo", "ciclo"),
    ],
    sort: &[SortKey::desc(DATE), SortKey::desc(CREATED_AT_COLUMN)],
    breakdowns: &[
        Breakdown::count("por_dia", GroupBy::Day(DATE)).last_days(RECENT_DAYS_WINDOW),
        Breakdown::count("por_mes", GroupBy::Month(DATE)).last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::count("por_tipo", GroupBy::Field("tipo")),
    ],
    examples: &[&[
        "2026-02-17",
        "Asignacion",
        "Comuna 2",
        "2026-02-20",
        "Juan Pérez",
        "16000000",
        "Cali",
        "3001234567",
        "Escritura",
        "123456",
        "40-0012",
        "40",
        "Calle 5 #10-20",
        "Recibo",
        "",
    ]],
    instructions: &[
        "Tipo: Asignacion o Certificacion.",
        "Nombres Solicitante es obligatorio.",
        "Fechas en formato AAAA-MM-DD o DD/MM/AAAA; Fecha Visita puede quedar vacía.",
    ],
    ..Schema::BASE
};
