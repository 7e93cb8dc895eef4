//! Port interfaces for the report unit
//!
//! These traits define the boundaries between the report logic and the
//! backend, spreadsheet and clock implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use opsboard_domain::{
    OpsBoardError, Page, PageRequest, Predicate, Record, RecordId, Result, Sheet, SortKey,
    Workbook,
};

/// A read against one table: predicates AND-ed together, rows in `order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub table: String,
    pub predicates: Vec<Predicate>,
    pub order: Vec<SortKey>,
}

impl TableQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self { table: table.into(), predicates: Vec::new(), order: Vec::new() }
    }

    #[must_use]
    pub fn with_predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates = predicates;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: &[SortKey]) -> Self {
        self.order = order.to_vec();
        self
    }
}

/// Trait for the remote table service
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// One page of matching rows plus the exact total count
    async fn select_page(&self, query: &TableQuery, page: PageRequest) -> Result<Page>;

    /// Every matching row, unpaginated
    async fn select_all(&self, query: &TableQuery) -> Result<Vec<Record>>;

    /// Insert rows and return them as stored
    async fn insert(&self, table: &str, rows: Vec<Record>) -> Result<Vec<Record>>;

    /// Insert rows, merging into existing rows that share the `conflict` key
    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Record>,
        conflict: &[&str],
    ) -> Result<Vec<Record>>;

    /// Overwrite the row with `id`; `NotFound` when no row matched
    async fn update(&self, table: &str, id: &RecordId, row: Record) -> Result<Record>;

    async fn delete(&self, table: &str, id: &RecordId) -> Result<()>;
}

/// Trait for reading and writing spreadsheet files
pub trait SpreadsheetCodec: Send + Sync {
    /// Decode the first sheet of a workbook
    fn read_first_sheet(&self, bytes: &[u8]) -> Result<Sheet>;

    /// Encode a workbook as `.xlsx`
    fn write(&self, workbook: &Workbook) -> Result<Vec<u8>>;
}

/// Source of "today" for date defaults and report windows
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in a fixed IANA timezone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from a zone name such as `America/Bogota`.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| OpsBoardError::Config(format!("unknown timezone: {name}")))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}
