//! Meter review supervisions, read-only

use opsboard_domain::constants::{CREATED_AT_COLUMN, CREATOR_NAME_COLUMN};
use opsboard_domain::{FieldSpec, FilterSpec};

use crate::report::{Breakdown, GroupBy, Schema};

pub static SCHEMA: Schema = Schema {
    table: "revisiones",
    title: "Revisiones",
    fields: &[
        FieldSpec::text("estado_general", "Estado general"),
        FieldSpec::text("resultado_revision", "Observación"),
        FieldSpec::json("evidencias_imagenes", "Evidencias"),
        FieldSpec::decimal("ubicacion_lat", "Latitud"),
        FieldSpec::decimal("ubicacion_lon", "Longitud"),
    ],
    filters: &[
        FilterSpec::contains("creado_por", CREATOR_NAME_COLUMN),
        FilterSpec::at_least("fecha_desde", CREATED_AT_COLUMN),
        FilterSpec::until_end_of_day("fecha_hasta", CREATED_AT_COLUMN),
    ],
    read_only: true,
    breakdowns: &[Breakdown::count("por_resultado", GroupBy::Field("resultado_revision"))],
    ..Schema::BASE
};
