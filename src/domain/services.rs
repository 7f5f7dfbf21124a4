//! Service seams of the harvest pipeline
//!
//! The driver only talks to these traits, so tests can swap the network,
//! the extractor or the output file for in-memory fakes.

use async_trait::async_trait;

use crate::domain::errors::HarvestResult;
use crate::domain::record::{PageRequest, Record};

/// Source of raw page content
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page; exactly one request per call, no retry
    async fn fetch_page(&self, request: &PageRequest) -> HarvestResult<String>;
}

/// Turns raw page content into records
pub trait RecordExtractor: Send + Sync {
    /// Never fails: unusable markup yields no records
    fn extract(&self, html: &str) -> Vec<Record>;
}

/// Destination for the accumulated result set
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Replace the stored content with the full set of records
    async fn persist(&self, records: &[Record]) -> HarvestResult<()>;

    /// Human-readable location, used in logs and the run report
    fn location(&self) -> std::path::PathBuf;
}
