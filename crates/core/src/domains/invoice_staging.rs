//! Invoice staging log
//!
//! One row per cycle prepared for printing or e-mailing: dates of each
//! step, invoice and attachment counts, the package breakdown as JSON and
//! the digital dispatch outcomes. Rows are owned by the staff member who
//! created them.

use opsboard_domain::constants::{CREATED_AT_COLUMN, RECENT_MONTHS_WINDOW};
use opsboard_domain::{FieldSpec, FilterSpec, Record, SortKey};
use serde_json::{Map, Value};

use super::cycle_control::{cycle_control, MasterCycles};
use super::digital_results::RESULT_COLUMNS;
use crate::report::{Breakdown, CreatorStamp, DefaultPeriod, GroupBy, Schema, Total};

pub const PUBLIC_SERVICES: &str = "servicios_publicos";
pub const TELECOM: &str = "telecomunicaciones";

/// Cycles staged every month, per service type
pub const MASTER_CYCLES: &[MasterCycles] = &[
    MasterCycles {
        group: PUBLIC_SERVICES,
        cycles: &[
            "2", "4", "5", "6", "8", "10", "12", "14", "16", "18", "19", "20", "21", "22", "24",
            "26", "28", "29", "30", "32", "33", "34", "35", "36", "37", "38", "39", "40", "41",
            "42", "44", "46", "47", "48", "49", "50", "51", "53", "55", "58", "60", "61", "62",
            "63", "64", "66", "67", "69", "70", "71", "72", "74", "76", "77", "80", "81", "84",
            "91",
        ],
    },
    MasterCycles {
        group: TELECOM,
        cycles: &[
            "102", "104", "106", "108", "110", "112", "114", "116", "118", "120", "122", "124",
            "126", "128", "130", "132", "134", "136", "138", "140", "142", "144", "145", "146",
            "148", "150", "160", "162", "164", "166", "191",
        ],
    },
];

fn control_ciclos(records: &[Record]) -> Map<String, Value> {
    let mut extras = Map::new();
    extras.insert(
        "control_ciclos".into(),
        Value::Object(cycle_control(MASTER_CYCLES, records, "tipo_servicio", "ciclo_id")),
    );
    extras
}

pub static SCHEMA: Schema = Schema {
    table: "alistamiento_facturas",
    title: "Alistamiento de Facturas",
    fields: &[
        FieldSpec::text("tipo_servicio", "Servicio"),
        FieldSpec::int("ciclo_id", "Ciclo ID"),
        FieldSpec::text("ciclo_nombre", "Ciclo"),
        FieldSpec::date("mes_trabajo", "Mes Trabajo"),
        FieldSpec::date("fecha_envio", "Fecha Envío"),
        FieldSpec::date("fecha_vencimiento", "Fecha Vencimiento"),
        FieldSpec::date("fecha_aprobacion", "Fecha Aprobación"),
        FieldSpec::date("fecha_alistamiento", "Fecha Alistamiento"),
        FieldSpec::int("cantidad_facturas", "Facturas"),
        FieldSpec::int("cantidad_anexos", "Anexos"),
        FieldSpec::int("cantidad_facturas_digitales", "Digitales"),
        FieldSpec::int("cantidad_facturas_pdf", "PDF"),
        FieldSpec::int("cantidad_sin_ruta", "Sin Ruta"),
        FieldSpec::int("cantidad_empresas", "Empresas"),
        FieldSpec::int("cantidad_retenidas", "Retenidas"),
        FieldSpec::int("cantidad_da", "DA"),
        FieldSpec::int("cantidad_paquetes", "Paquetes"),
        FieldSpec::json("paquetes", "Paquetes (JSON)").default_value("[]"),
        FieldSpec::text("aprobado_por", "Aprobado por"),
        FieldSpec::text("alistado_por", "Alistado por"),
        FieldSpec::text("novedades", "Novedades"),
        FieldSpec::int("cantidad_cartas_impedimento", "Cartas Impedimento"),
        FieldSpec::int("cantidad_facturas_blancas", "Facturas Blancas"),
        FieldSpec::int("cantidad_facturas_amarillas", "Facturas Amarillas"),
        FieldSpec::int("cantidad_pdf_adicionales", "PDF Adicionales"),
        FieldSpec::time("hora_envio_ciclo", "Hora Envío Ciclo"),
        FieldSpec::time("hora_aprobacion", "Hora Aprobación"),
        FieldSpec::time("hora_alistamiento", "Hora Alistamiento"),
        FieldSpec::int("cantidad_cartas_desviaciones", "Cartas Desviaciones"),
        FieldSpec::int("cantidad_cartera", "Cartera"),
        FieldSpec::date("fecha_envio_muestras", "Fecha Envío Muestras").nullable(),
        FieldSpec::time("hora_envio_muestras", "Hora Envío Muestras"),
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
        FilterSpec::contains("ciclo", "ciclo_nombre").in_filename("ciclo_"),
        FilterSpec::equals("servicio", "tipo_servicio"),
        FilterSpec::contains("usuario", "alistado_por"),
    ],
    sort: &[SortKey::desc("mes_trabajo"), SortKey::desc(CREATED_AT_COLUMN)],
    stamp: CreatorStamp::Owner,
    totals: &[
        Total::new("cantidad_facturas", &["cantidad_facturas"]),
        Total::new("cantidad_anexos", &["cantidad_anexos"]),
        Total::new("cantidad_paquetes", &["cantidad_paquetes"]),
    ],
    breakdowns: &[
        Breakdown::sum("facturas_por_servicio", GroupBy::Field("tipo_servicio"), &["cantidad_facturas"]),
        Breakdown::count("registros_por_dia", GroupBy::Day("mes_trabajo")),
        Breakdown::sum("facturas_por_mes", GroupBy::Month("mes_trabajo"), &["cantidad_facturas"])
            .last_keys(RECENT_MONTHS_WINDOW),
        Breakdown::field_set("resultados_digitales", RESULT_COLUMNS),
    ],
    extras: Some(control_ciclos),
    default_period: DefaultPeriod::CurrentMonth { from: "fecha_desde", to: "fecha_hasta" },
    examples: &[
        &[
            PUBLIC_SERVICES, "40", "Ciclo 40", "2026-02-01", "2026-02-01", "2026-02-15",
            "2026-02-10", "2026-02-05", "150", "10", "120", "20", "5", "3", "2", "0", "2",
            r#"[{"tipo":"normal","cantidad":2}]"#, "Juan Perez", "Maria Gomez", "Todo correcto",
            "0", "0", "0", "0", "08:00", "09:30", "07:45", "0", "0", "2026-02-06", "10:15", "2",
            "1", "0", "1", "0", "50", "3", "1", "0", "0",
        ],
        &[
            TELECOM, "42", "Ciclo 42", "2026-02-01", "2026-02-02", "2026-02-16", "2026-02-11",
            "2026-02-06", "80", "5", "60", "15", "2", "1", "1", "1", "1",
            r#"[{"tipo":"express","cantidad":1}]"#, "Carlos Ruiz", "Ana Torres", "Sin novedad",
            "1", "2", "1", "2", "09:00", "10:00", "08:00", "1", "0", "2026-02-07", "11:00", "0",
            "2", "1", "0", "1", "30", "2", "0", "1", "0",
        ],
    ],
    instructions: &[
        "Formato de fechas: AAAA-MM-DD (ej: 2026-02-17).",
        "Formato de horas: HH:MM en 24 horas (ej: 14:30).",
        "Campos numéricos: solo números enteros.",
        "Servicio: servicios_publicos o telecomunicaciones.",
        r#"Paquetes (JSON): lista de paquetes, ej: [{"nombre":"paq1","cantidad":5}]."#,
        "El usuario y las fechas de creación se generan automáticamente.",
    ],
    ..Schema::BASE
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_lists_have_no_duplicates() {
        for master in MASTER_CYCLES {
            let mut cycles = master.cycles.to_vec();
            cycles.sort_unstable();
            cycles.dedup();
            assert_eq!(cycles.len(), master.cycles.len(), "{}", master.group);
        }
        assert_eq!(MASTER_CYCLES[0].cycles.len(), 58);
        assert_eq!(MASTER_CYCLES[1].cycles.len(), 31);
    }

    #[test]
    fn control_reports_both_service_types() {
        let records = vec![Record::new().with("tipo_servicio", TELECOM).with("ciclo_id", 191)];
        let extras = control_ciclos(&records);
        let control = &extras["control_ciclos"];
        assert_eq!(control[TELECOM]["procesados"], 1);
        assert_eq!(control[PUBLIC_SERVICES]["procesados"], 0);
        assert_eq!(control[PUBLIC_SERVICES]["total"], 58);
    }
}
