//! In-memory `RecordStore`
//!
//! Evaluates predicates and ordering on the text form of each column, the
//! same way the backend compares ISO dates and months.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, AtomicUsize};
use std::sync::Arc;

use async_trait::async_trait;
use opsboard_core::{RecordStore, TableQuery};
use opsboard_domain::constants::{CREATED_AT_COLUMN, ID_COLUMN};
use opsboard_domain::{
    FilterOp, OpsBoardError, Page, PageRequest, Predicate, Record, RecordId, Result,
};
use parking_lot::Mutex;

#[derive(Default)]
struct Tables {
    rows: Vec<(String, Record)>,
}

/// Mutable table store shared between clones.
#[derive(Default, Clone)]
pub struct MockRecordStore {
    tables: Arc<Mutex<Tables>>,
    next_id: Arc<AtomicI64>,
    /// When set, every read fails with this error
    failure: Arc<Mutex<Option<OpsBoardError>>>,
    writes: Arc<AtomicUsize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with a row; an id is assigned when missing.
    pub fn with_row(self, table: &str, row: Record) -> Self {
        self.push(table, row);
        self
    }

    pub fn with_rows(self, table: &str, rows: impl IntoIterator<Item = Record>) -> Self {
        for row in rows {
            self.push(table, row);
        }
        self
    }

    /// Make subsequent reads fail (or succeed again with `None`).
    pub fn fail_reads(&self, error: Option<OpsBoardError>) {
        *self.failure.lock() = error;
    }

    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .rows
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Number of write calls (insert, upsert, update, delete) received.
    pub fn write_calls(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn push(&self, table: &str, mut row: Record) -> Record {
        if row.id().is_none() {
            let id = self.next_id.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
            row.set(ID_COLUMN, id);
        }
        if row.is_blank(CREATED_AT_COLUMN) {
            row.set(CREATED_AT_COLUMN, "2026-02-14T08:00:00");
        }
        self.tables.lock().rows.push((table.to_string(), row.clone()));
        row
    }

    fn check_reads(&self) -> Result<()> {
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn matching(&self, query: &TableQuery) -> Vec<Record> {
        let mut rows: Vec<Record> = self
            .rows(&query.table)
            .into_iter()
            .filter(|row| query.predicates.iter().all(|p| matches(row, p)))
            .collect();
        rows.sort_by(|a, b| {
            query.order.iter().fold(Ordering::Equal, |acc, key| {
                acc.then_with(|| {
                    let ord = a.text(key.column).cmp(&b.text(key.column));
                    if key.descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
            })
        });
        rows
    }
}

fn matches(row: &Record, predicate: &Predicate) -> bool {
    let Some(value) = row.text(&predicate.column) else {
        return false;
    };
    let wanted = predicate.value.as_str();
    match predicate.op {
        FilterOp::Equals => value == wanted,
        FilterOp::Contains => value.to_lowercase().contains(&wanted.to_lowercase()),
        FilterOp::AtLeast => value.as_str() >= wanted,
        FilterOp::AtMost | FilterOp::UntilEndOfDay => value.as_str() <= wanted,
    }
}

fn same_key(a: &Record, b: &Record, conflict: &[&str]) -> bool {
    conflict.iter().all(|c| a.text(c) == b.text(c))
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn select_page(&self, query: &TableQuery, page: PageRequest) -> Result<Page> {
        self.check_reads()?;
        let rows = self.matching(query);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(Page {
            total: rows.len() as u64,
            items: rows.into_iter().skip(offset).take(page.size as usize).collect(),
            page: page.page,
            page_size: page.size,
        })
    }

    async fn select_all(&self, query: &TableQuery) -> Result<Vec<Record>> {
        self.check_reads()?;
        Ok(self.matching(query))
    }

    async fn insert(&self, table: &str, rows: Vec<Record>) -> Result<Vec<Record>> {
        self.count_write();
        Ok(rows.into_iter().map(|row| self.push(table, row)).collect())
    }

    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Record>,
        conflict: &[&str],
    ) -> Result<Vec<Record>> {
        self.count_write();
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let merged = {
                let mut tables = self.tables.lock();
                tables
                    .rows
                    .iter_mut()
                    .find(|(t, existing)| t == table && same_key(existing, &row, conflict))
                    .map(|(_, existing)| {
                        for (column, value) in row.fields() {
                            existing.set(column.clone(), value.clone());
                        }
                        existing.clone()
                    })
            };
            stored.push(match merged {
                Some(existing) => existing,
                None => self.push(table, row),
            });
        }
        Ok(stored)
    }

    async fn update(&self, table: &str, id: &RecordId, row: Record) -> Result<Record> {
        self.count_write();
        let mut tables = self.tables.lock();
        let (_, existing) = tables
            .rows
            .iter_mut()
            .find(|(t, r)| t == table && r.id().as_ref() == Some(id))
            .ok_or_else(|| OpsBoardError::NotFound(format!("{table} {id}")))?;
        for (column, value) in row.fields() {
            existing.set(column.clone(), value.clone());
        }
        Ok(existing.clone())
    }

    async fn delete(&self, table: &str, id: &RecordId) -> Result<()> {
        self.count_write();
        self.tables.lock().rows.retain(|(t, r)| !(t == table && r.id().as_ref() == Some(id)));
        Ok(())
    }
}
