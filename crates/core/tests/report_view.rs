//! Integration tests for the `ReportView` page state machine

mod support;

use opsboard_core::domains::{cause_analysis, digital_results};
use opsboard_core::{ReportView, ViewState};
use opsboard_domain::{Filter, OpsBoardError, Record};
use support::{admin, resource, FakeCodec, MockRecordStore};

fn causes(count: u32) -> Vec<Record> {
    (1..=count)
        .map(|day| {
            Record::new()
                .with("ciclo", "40")
                .with("fecha_analisis", format!("2026-02-{day:02}"))
                .with("causa_13", 1)
        })
        .collect()
}

#[tokio::test]
async fn starts_idle_with_the_current_month() {
    let resource = resource(&digital_results::SCHEMA, &MockRecordStore::new(), &FakeCodec::new());

    let view = ReportView::new(resource);

    assert_eq!(view.state(), &ViewState::Idle);
    assert_eq!(view.page(), 1);
    assert_eq!(view.filter().get("fecha_desde"), Some("2026-02-01"));
    assert_eq!(view.filter().get("fecha_hasta"), Some("2026-02-28"));
}

#[tokio::test]
async fn refresh_loads_rows_and_aggregates_together() {
    let store = MockRecordStore::new().with_rows("analisis_causas", causes(12));
    let mut view = ReportView::new(resource(&cause_analysis::SCHEMA, &store, &FakeCodec::new()));

    let state = view.refresh().await.clone();

    assert_eq!(state, ViewState::Loaded);
    assert_eq!(view.rows().len(), 10);
    assert_eq!(view.total(), 12);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.stats().totals.int("total_general"), 12);
}

#[tokio::test]
async fn failed_reload_keeps_what_was_shown() {
    // Arrange
    let store = MockRecordStore::new().with_rows("analisis_causas", causes(15));
    let mut view = ReportView::new(resource(&cause_analysis::SCHEMA, &store, &FakeCodec::new()));
    view.refresh().await;
    let first_page = view.rows().to_vec();

    // Act
    store.fail_reads(Some(OpsBoardError::Network("connection reset".into())));
    let state = view.set_page(2).await.clone();

    // Assert
    assert!(matches!(state, ViewState::LoadError(ref msg) if msg.contains("connection reset")));
    assert_eq!(view.page(), 1);
    assert_eq!(view.rows(), first_page.as_slice());
    assert_eq!(view.total(), 15);
    assert_eq!(view.stats().record_count, 15);

    store.fail_reads(None);
    assert_eq!(view.set_page(2).await, &ViewState::Loaded);
    assert_eq!(view.page(), 2);
    assert_eq!(view.rows().len(), 5);
}

#[tokio::test]
async fn failed_filter_change_keeps_the_previous_filter() {
    let store = MockRecordStore::new().with_rows("analisis_causas", causes(12));
    let mut view = ReportView::new(resource(&cause_analysis::SCHEMA, &store, &FakeCodec::new()));
    view.set_page(2).await;
    let shown = view.filter().clone();

    store.fail_reads(Some(OpsBoardError::Network("timeout".into())));
    let state = view.set_filter(Filter::new().with("ciclo", "41")).await.clone();

    assert!(matches!(state, ViewState::LoadError(_)));
    assert_eq!(view.filter(), &shown);
    assert_eq!(view.page(), 2);
    assert_eq!(view.rows().len(), 2);

    store.fail_reads(None);
    assert_eq!(view.set_filter(Filter::new()).await, &ViewState::Loaded);
    assert_eq!(view.page(), 1);
    assert_eq!(view.filter(), &Filter::new());
}

#[tokio::test]
async fn writes_reload_the_view() {
    let store = MockRecordStore::new().with_rows("analisis_causas", causes(2));
    let mut view = ReportView::new(resource(&cause_analysis::SCHEMA, &store, &FakeCodec::new()));
    view.refresh().await;

    let saved = view
        .save(&admin(), &Record::new().with("ciclo", "41").with("causa_15", 4), None)
        .await
        .unwrap();
    assert_eq!(view.total(), 3);
    assert_eq!(view.stats().totals.int("total_general"), 6);

    view.delete(&admin(), &saved.id().unwrap()).await.unwrap();
    assert_eq!(view.total(), 2);
}
