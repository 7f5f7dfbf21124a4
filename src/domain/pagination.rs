//! Pagination domain logic.
//!
//! Responsibility:
//! - page count from a known total and page size
//! - 1-based start row of each page

use crate::domain::errors::{HarvestError, HarvestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    total_records: u32,
    page_size: u32,
}

impl PagePlan {
    pub fn new(total_records: u32, page_size: u32) -> HarvestResult<Self> {
        if page_size == 0 {
            return Err(HarvestError::Config("page_size must be greater than 0".to_string()));
        }
        Ok(Self {
            total_records,
            page_size,
        })
    }

    pub const fn total_records(&self) -> u32 {
        self.total_records
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// ceil(total / page size)
    pub const fn page_count(&self) -> u32 {
        self.total_records.div_ceil(self.page_size)
    }

    /// Start row for a 1-based page index: (page - 1) * size + 1
    pub const fn start_row(&self, page: u32) -> u32 {
        page.saturating_sub(1) * self.page_size + 1
    }

    /// `(page index, start row)` for every page, in order
    pub fn pages(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1..=self.page_count()).map(|page| (page, self.start_row(page)))
    }
}
