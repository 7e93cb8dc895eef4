//! Page state machine for one report screen
//!
//! `Idle -> Loading -> {Loaded | LoadError}`. Any filter, page or data
//! change goes back through `Loading` and reloads the page and the
//! aggregates together. A failed load keeps whatever was shown before.

use std::sync::Arc;

use opsboard_domain::constants::PAGE_SIZE;
use opsboard_domain::{Actor, Filter, PageRequest, Record, RecordId, ReportStats, Result};
use serde::Serialize;
use tracing::error;

use super::import::ImportBatch;
use super::service::ReportResource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading,
    Loaded,
    LoadError(String),
}

/// Rows, total and aggregates currently visible for one domain
pub struct ReportView {
    resource: Arc<ReportResource>,
    filter: Filter,
    page: u32,
    state: ViewState,
    rows: Vec<Record>,
    total: u64,
    stats: ReportStats,
}

impl ReportView {
    /// Start idle on page 1 with the domain's default filter.
    pub fn new(resource: Arc<ReportResource>) -> Self {
        let filter = resource.default_filter();
        Self {
            resource,
            filter,
            page: 1,
            state: ViewState::Idle,
            rows: Vec::new(),
            total: 0,
            stats: ReportStats::default(),
        }
    }

    /// Outcome of the last transition.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Filter of the rows currently shown.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Page of the rows currently shown (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows of the current page.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Matching rows across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Pages needed for `total` at the fixed page size.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(PAGE_SIZE))
    }

    /// Aggregates over the period part of the filter.
    pub fn stats(&self) -> &ReportStats {
        &self.stats
    }

    /// Reload the current page and the aggregates concurrently.
    pub async fn refresh(&mut self) -> &ViewState {
        self.load(self.filter.clone(), self.page).await
    }

    /// Replace the filter and go back to page 1.
    pub async fn set_filter(&mut self, filter: Filter) -> &ViewState {
        self.load(filter, 1).await
    }

    /// Move to another page under the same filter.
    pub async fn set_page(&mut self, page: u32) -> &ViewState {
        self.load(self.filter.clone(), page).await
    }

    /// Filter and page become current only once their rows arrived, so a
    /// failed load leaves rows, total, page and filter describing each other.
    async fn load(&mut self, filter: Filter, page: u32) -> &ViewState {
        self.state = ViewState::Loading;
        let loaded = futures::try_join!(
            self.resource.load_page(&filter, PageRequest::new(page)),
            self.resource.aggregate(&filter)
        );
        match loaded {
            Ok((rows, stats)) => {
                self.filter = filter;
                self.page = page;
                self.rows = rows.items;
                self.total = rows.total;
                self.stats = stats;
                self.state = ViewState::Loaded;
            }
            Err(err) => {
                error!(table = self.resource.schema().table, page, error = %err, "Failed to load report view");
                self.state = ViewState::LoadError(err.to_string());
            }
        }
        &self.state
    }

    /// Save through the resource, then reload.
    pub async fn save(
        &mut self,
        actor: &Actor,
        form: &Record,
        id: Option<&RecordId>,
    ) -> Result<Record> {
        let saved = self.resource.save(actor, form, id).await?;
        self.refresh().await;
        Ok(saved)
    }

    /// Delete through the resource, then reload.
    pub async fn delete(&mut self, actor: &Actor, id: &RecordId) -> Result<()> {
        self.resource.delete(actor, id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Write an import batch, then reload.
    pub async fn commit_import(&mut self, batch: ImportBatch) -> Result<usize> {
        let written = self.resource.commit_import(batch).await?;
        self.refresh().await;
        Ok(written)
    }
}
