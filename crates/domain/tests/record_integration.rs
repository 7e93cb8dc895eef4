//! Integration tests for the public domain surface

use opsboard_domain::utils::dates::{month_key, parse_date};
use opsboard_domain::{
    FieldSpec, Filter, OpsBoardError, Page, PageRequest, Record, ReportStats, Role,
};
use serde_json::json;

#[test]
fn backend_rows_round_trip_through_record() {
    let row = json!({
        "id": 7,
        "ciclo": 40,
        "mes_vigencia": "2026-02",
        "total_enviados": 1500,
        "porcentaje_integracion": 80.0,
        "created_at": "2026-02-14T15:04:05.123+00:00"
    });

    let record: Record = serde_json::from_value(row.clone()).unwrap();
    assert_eq!(record.id().unwrap().as_str(), "7");
    assert_eq!(record.int("total_enviados"), 1500);
    assert!((record.number("porcentaje_integracion") - 80.0).abs() < f64::EPSILON);

    let created = parse_date(&record.text("created_at").unwrap()).unwrap();
    assert_eq!(month_key(created), "2026-02");
    assert_eq!(serde_json::to_value(&record).unwrap(), row);
}

#[test]
fn page_of_records_serializes_for_cli_output() {
    let request = PageRequest::new(2);
    let page = Page {
        items: vec![Record::new().with("ciclo", 40)],
        total: 11,
        page: request.page,
        page_size: request.size,
    };
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["total"], 11);
    assert_eq!(value["items"][0]["ciclo"], 40);
    assert_eq!(page.total_pages(), 2);
}

#[test]
fn filters_deserialize_from_flat_json() {
    let filter: Filter =
        serde_json::from_value(json!({"ciclo": "40", "fecha_desde": ""})).unwrap();
    assert_eq!(filter.get("ciclo"), Some("40"));
    assert_eq!(filter.get("fecha_desde"), None);
}

#[test]
fn errors_and_roles_use_stable_wire_forms() {
    let err = OpsBoardError::NotFound("record 7".into());
    assert_eq!(serde_json::to_value(&err).unwrap(), json!({"type": "NotFound", "message": "record 7"}));
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
    assert_eq!(serde_json::to_value(ReportStats::default()).unwrap()["record_count"], 0);
}

#[test]
fn field_specs_serialize_for_domain_listing() {
    let spec = FieldSpec::month("mes_vigencia", "Mes").required();
    let value = serde_json::to_value(spec).unwrap();
    assert_eq!(value["kind"], "month");
    assert_eq!(value["origin"], "input");
    assert_eq!(value["required"], true);
}
