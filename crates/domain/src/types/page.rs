//! Pagination

use serde::{Deserialize, Serialize};

use super::record::Record;
use crate::constants::PAGE_SIZE;
use crate::errors::{OpsBoardError, Result};

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Request `page` at the standard page size.
    pub fn new(page: u32) -> Self {
        Self { page, size: PAGE_SIZE }
    }

    /// Reject page 0 and empty pages.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(OpsBoardError::validation("page numbers start at 1"));
        }
        if self.size == 0 {
            return Err(OpsBoardError::validation("page size must be positive"));
        }
        Ok(())
    }

    /// Zero-based row offset of the first row on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One page of rows plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T = Record> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self { items: Vec::new(), total: 0, page: request.page, page_size: request.size }
    }

    /// `ceil(total / page_size)`; 0 when nothing matches.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}
