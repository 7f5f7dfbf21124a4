//! Per-page outcomes and the per-run report returned by the driver.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::domain::record::Record;
use crate::domain::value_objects::RunId;

/// Result of one page iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Succeeded {
        page: u32,
        start_row: u32,
        records: usize,
    },
    Failed {
        page: u32,
        start_row: u32,
        /// HTTP status when the failure was a non-success response
        status: Option<u16>,
        reason: String,
    },
}

impl PageOutcome {
    pub const fn page(&self) -> u32 {
        match self {
            Self::Succeeded { page, .. } | Self::Failed { page, .. } => *page,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub output_path: PathBuf,
    pub page_count: u32,
    pub outcomes: Vec<PageOutcome>,
    /// Accumulated result set, in page then in-page order
    pub records: Vec<Record>,
}

impl RunReport {
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn failed_pages(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(PageOutcome::page)
            .collect()
    }

    pub fn succeeded_pages(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(PageOutcome::page)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(PageOutcome::is_success)
    }

    /// Final one-line summary printed at the end of a run
    pub fn summary(&self) -> String {
        let failed = self.failed_pages();
        if failed.is_empty() {
            format!(
                "Done! Saved {} records to {}",
                self.total_records(),
                self.output_path.display()
            )
        } else {
            format!(
                "Done! Saved {} records to {} ({} of {} pages failed: {:?})",
                self.total_records(),
                self.output_path.display(),
                failed.len(),
                self.page_count,
                failed
            )
        }
    }
}
