//! Shared test helpers for `opsboard-core` integration tests.
//!
//! In-memory ports so report and auth tests can focus on behaviour instead
//! of wiring.

#![allow(dead_code)]

pub mod auth;
pub mod store;

use std::sync::Arc;

use chrono::NaiveDate;
use opsboard_core::{Clock, RecordStore, ReportResource, SpreadsheetCodec};
use opsboard_domain::{Actor, Result, Role, Sheet, Workbook};
use parking_lot::Mutex;
use uuid::Uuid;

pub use self::store::MockRecordStore;
use opsboard_core::Schema;

/// Clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Codec that hands back a canned sheet and records written workbooks.
#[derive(Default, Clone)]
pub struct FakeCodec {
    sheet: Arc<Sheet>,
    written: Arc<Mutex<Vec<Workbook>>>,
}

impl FakeCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet returned by every `read_first_sheet` call.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheet = Arc::new(sheet);
        self
    }

    pub fn written(&self) -> Vec<Workbook> {
        self.written.lock().clone()
    }
}

impl SpreadsheetCodec for FakeCodec {
    fn read_first_sheet(&self, _bytes: &[u8]) -> Result<Sheet> {
        Ok((*self.sheet).clone())
    }

    fn write(&self, workbook: &Workbook) -> Result<Vec<u8>> {
        self.written.lock().push(workbook.clone());
        Ok(b"xlsx".to_vec())
    }
}

pub fn admin() -> Actor {
    Actor::new(Uuid::nil(), "admin@example.com", Role::Admin)
}

pub fn viewer() -> Actor {
    Actor::new(Uuid::from_u128(7), "consulta@example.com", Role::Consulta)
}

/// Resource over `schema` backed by the given store and codec, with today
/// fixed at 2026-02-14.
pub fn resource(
    schema: &'static Schema,
    store: &MockRecordStore,
    codec: &FakeCodec,
) -> Arc<ReportResource> {
    let store: Arc<dyn RecordStore> = Arc::new(store.clone());
    let codec: Arc<dyn SpreadsheetCodec> = Arc::new(codec.clone());
    Arc::new(ReportResource::new(schema, store, codec, Arc::new(FixedClock::ymd(2026, 2, 14))))
}
