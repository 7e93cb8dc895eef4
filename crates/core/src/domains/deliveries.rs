//! Invoice delivery supervisions, read-only
//!
//! Each row is one visit to a delivery worker on route, with the invoices
//! they carried and the state of their uniform.

use opsboard_domain::constants::CREATED_AT_COLUMN;
use opsboard_domain::{FieldSpec, FilterSpec};

use crate::report::{Breakdown, GroupBy, Schema, Total};

pub static SCHEMA: Schema = Schema {
    table: "repartos",
    title: "Repartos",
    fields: &[
        FieldSpec::text("gestor_nombre", "Repartidor"),
        FieldSpec::text("ciclo_reparto", "Ciclo"),
        FieldSpec::text("cliente_nombre", "Cliente"),
        FieldSpec::text("direccion", "Dirección"),
        FieldSpec::int("cantidad_facturas", "Facturas"),
        FieldSpec::text("estado_gorra", "Gorra"),
        FieldSpec::text("estado_camisa", "Camisa"),
        FieldSpec::text("estado_botas", "Botas"),
        FieldSpec::text("estado_pantalon", "Pantalón"),
        FieldSpec::text("observaciones", "Observaciones"),
        FieldSpec::json("evidencias_imagenes", "Evidencias"),
        FieldSpec::decimal("ubicacion_lat", "Latitud"),
        FieldSpec::decimal("ubicacion_lon", "Longitud"),
    ],
    filters: &[
        FilterSpec::contains("repartidor", "gestor_nombre"),
        FilterSpec::at_least("fecha_desde", CREATED_AT_COLUMN),
        FilterSpec::until_end_of_day("fecha_hasta", CREATED_AT_COLUMN),
    ],
    read_only: true,
    totals: &[Total::new("cantidad_facturas", &["cantidad_facturas"])],
    breakdowns: &[Breakdown::sum(
        "facturas_por_repartidor",
        GroupBy::Field("gestor_nombre"),
        &["cantidad_facturas"],
    )],
    ..Schema::BASE
};
