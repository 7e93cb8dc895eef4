//! Meter-reader field supervisions
//!
//! Captured by the mobile supervision app; browsed, charted and exported
//! here but never written.

use opsboard_domain::constants::{CREATED_AT_COLUMN, CREATOR_NAME_COLUMN};
use opsboard_domain::{FieldSpec, FilterSpec};

use crate::report::{Breakdown, GroupBy, Schema};

pub static SCHEMA: Schema = Schema {
    table: "lecturas",
    title: "Lecturas",
    fields: &[
        FieldSpec::text("gestor_nombre", "Gestor"),
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("estado_impresora", "Impresora"),
        FieldSpec::text("carnet_visible", "Carnet"),
        FieldSpec::text("estado_gorra", "Gorra"),
        FieldSpec::text("estado_camisa", "Camisa"),
        FieldSpec::text("estado_pantalon", "Pantalón"),
        FieldSpec::text("estado_botas", "Botas"),
        FieldSpec::text("estado_canguro", "Canguro"),
        FieldSpec::text("rollo_extra", "Rollo extra"),
        FieldSpec::text("binoculares", "Binoculares"),
        FieldSpec::text("linterna", "Linterna"),
        FieldSpec::text("tiza_atomizador", "Tiza / Atomizador"),
        FieldSpec::text("espejo", "Espejo"),
        FieldSpec::text("destornillador_gancho", "Herramienta"),
        FieldSpec::text("candela", "Candela"),
        FieldSpec::json("evidencias_imagenes", "Evidencias"),
        FieldSpec::decimal("ubicacion_lat", "Latitud"),
        FieldSpec::decimal("ubicacion_lon", "Longitud"),
    ],
    filters: &[
        FilterSpec::contains("creado_por", CREATOR_NAME_COLUMN),
        FilterSpec::equals("ciclo", "ciclo").period().in_filename("ciclo_"),
        FilterSpec::at_least("fecha_desde", CREATED_AT_COLUMN),
        FilterSpec::until_end_of_day("fecha_hasta", CREATED_AT_COLUMN),
    ],
    read_only: true,
    breakdowns: &[Breakdown::count("por_ciclo", GroupBy::Field("ciclo")).numeric_keys()],
    ..Schema::BASE
};
