//! Integration tests for the monthly cycle dashboard

mod support;

use std::sync::Arc;

use opsboard_core::{CycleDashboard, RecordStore};
use opsboard_domain::{OpsBoardError, Record};
use support::MockRecordStore;

fn visit(column: &str, cycle: &str, created_at: &str) -> Record {
    Record::new().with(column, cycle).with("created_at", created_at)
}

fn dashboard(store: &MockRecordStore) -> CycleDashboard {
    let store: Arc<dyn RecordStore> = Arc::new(store.clone());
    CycleDashboard::new(store)
}

fn seeded() -> MockRecordStore {
    let february =
        (0..30).map(|i| visit("ciclo", "40", &format!("2026-02-{:02}T09:00:00", i % 28 + 1)));
    MockRecordStore::new()
        .with_rows("lecturas", february)
        .with_rows(
            "lecturas",
            [
                visit("ciclo", "4", "2026-02-28T23:30:00"),
                visit("ciclo", "4", "2026-03-01T00:00:00"),
                visit("ciclo", "40", "2026-01-31T18:00:00"),
                visit("ciclo", "40", "2026-01-05T18:00:00"),
                visit("ciclo", "7", "2026-01-05T18:00:00"),
            ],
        )
        .with_rows(
            "revisiones",
            [
                visit("ciclo", "102", "2026-02-10T10:00:00"),
                visit("ciclo", "102", "2026-02-11T10:00:00"),
            ],
        )
        .with_row("repartos", visit("ciclo_reparto", "40", "2026-02-03T07:00:00"))
}

#[tokio::test]
async fn counts_each_activity_for_the_month() {
    let store = seeded();

    let board = dashboard(&store).load("2026-02", false).await.unwrap();

    assert_eq!(board.mes, "2026-02");
    assert_eq!(board.mes_anterior, None);
    let names: Vec<_> = board.actividades.iter().map(|a| a.actividad).collect();
    assert_eq!(names, vec!["lecturas", "revisiones", "reparto"]);

    let readings = &board.actividades[0];
    assert_eq!(readings.meta, 30);
    assert_eq!(readings.total, 31);
    assert_eq!(readings.ciclos, 2);
    assert_eq!(readings.cumplen, 1);
    assert!((readings.porcentaje - 50.0).abs() < f64::EPSILON);
    let cycles: Vec<_> = readings
        .por_ciclo
        .iter()
        .map(|c| (c.ciclo.as_str(), c.actual, c.anterior, c.cumple))
        .collect();
    assert_eq!(cycles, vec![("4", 1, 0, false), ("40", 30, 0, true)]);

    let reviews = &board.actividades[1];
    assert_eq!((reviews.total, reviews.ciclos, reviews.cumplen), (2, 1, 0));

    let deliveries = &board.actividades[2];
    assert_eq!(deliveries.meta, 60);
    assert_eq!(deliveries.por_ciclo[0].ciclo, "40");
}

#[tokio::test]
async fn compare_attaches_the_previous_month() {
    let store = seeded();

    let board = dashboard(&store).load("2026-02-14", true).await.unwrap();

    assert_eq!(board.mes_anterior.as_deref(), Some("2026-01"));
    let readings = &board.actividades[0];
    let anterior: Vec<_> =
        readings.por_ciclo.iter().map(|c| (c.ciclo.as_str(), c.anterior)).collect();
    // Cycle 7 only ran in January and is not listed.
    assert_eq!(anterior, vec![("4", 0), ("40", 2)]);
}

#[tokio::test]
async fn a_failed_read_fails_the_dashboard() {
    let store = seeded();
    store.fail_reads(Some(OpsBoardError::Network("connection reset".into())));

    let err = dashboard(&store).load("2026-02", true).await.unwrap_err();

    assert_eq!(err, OpsBoardError::Network("connection reset".into()));
}

#[tokio::test]
async fn rejects_an_unreadable_month() {
    let err = dashboard(&MockRecordStore::new()).load("next month", false).await.unwrap_err();
    assert!(matches!(err, OpsBoardError::Validation(_)));
}
