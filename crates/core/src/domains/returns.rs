//! Undeliverable invoice returns
//!
//! Like claims, return spreadsheets have no date column and imported rows
//! are dated today.

use opsboard_domain::constants::{
    CREATED_AT_COLUMN, RECENT_DAYS_WINDOW, RECENT_MONTHS_WINDOW, TOP_N,
};
use opsboard_domain::{FieldSpec, FilterSpec, SortKey};

use crate::report::{Breakdown, GroupBy, Rule, Schema};

const DATE: &str = "fecha_devolucion";

pub static SCHEMA: Schema = Schema {
    table: "devoluciones",
    title: "Devoluciones",
    fields: &[
        FieldSpec::text("ciclo", "Ciclo"),
        FieldSpec::text("contrato", "Contrato"),
        FieldSpec::text("direccion", "Dirección"),
        FieldSpec::text("causal_devolucion", "Causal Devolución"),
        FieldSpec::text("cuentas_vencidas", "Cuentas Vencidas"),
        FieldSpec::text("verificacion", "Verificación"),
        FieldSpec::date(DATE, "Fecha"),
    ],
    filters: &[
        FilterSpec::at_least("fecha_desde", DATE),
        FilterSpec::at_most("fecha_hasta", DATE),
        FilterSpec::contains("ciclo", "ciclo").in_filename("ciclo_"),
        FilterSpec::contains("causal", "causal_devolucion"),
    ],
    sort: &[SortKey::desc(DATE), SortKey::desc(CREATED_AT_COLUMN)],
    rules: &[Rule::AnyOf {
        columns: &["ciclo", "contrato"],
        message: "Debe ingresar al menos ciclo o contrato",
    }],
    breakdowns: &[
        Breakdown::count("por_dia", GroupBy::Day(DATE)).last_days(RECENT_DAYS_WINDOW),
        Breakdown::count("por_mes", GroupBy::Month(DATE)).last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::count("por_causal", GroupBy::Field("causal_devolucion")).top(TOP_N),
    ],
    examples: &[
        &["40", "1234567", "Calle 10 #5-20", "8 - No Reciben", "2", "Devolucion Correcta", "2026-02-17"],
        &["42", "", "Carrera 3 #1-10", "5 - No Existe Direccion", "0", "", "2026-02-17"],
    ],
    instructions: &[
        "Debe ingresar al menos Ciclo o Contrato.",
        "Causal: 2 - Demolicion, 4 - Lote, 5 - No Existe Direccion, 8 - No Reciben, \
         9 - Ruta Errada, 10 - Repetida u Otro.",
        "Si la columna Fecha no se incluye, la devolución queda con la fecha de hoy.",
    ],
    ..Schema::BASE
};
