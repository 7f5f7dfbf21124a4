//! Pagination driver
//!
//! Walks every page of the plan in order: fetch, extract, accumulate, rewrite
//! the output, then wait before the next page. A failed page is logged,
//! recorded in the report and followed immediately by the next page.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{Instrument, debug, error, info, info_span};

use crate::domain::{
    HarvestResult, PageOutcome, PagePlan, PageRequest, PageSource, Record, RecordExtractor, RecordSink,
    RunId, RunReport, SortDirection,
};
use crate::infrastructure::config::HarvestConfig;
use crate::infrastructure::http_client::FormPageFetcher;
use crate::infrastructure::parsing::build_extractor;
use crate::infrastructure::record_file::FileRecordSink;

/// Sequential page-by-page harvester
pub struct HarvestDriver {
    source: Arc<dyn PageSource>,
    extractor: Box<dyn RecordExtractor>,
    sink: Arc<dyn RecordSink>,
    plan: PagePlan,
    sort_column: String,
    sort_direction: SortDirection,
    page_delay: Duration,
}

impl HarvestDriver {
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: Box<dyn RecordExtractor>,
        sink: Arc<dyn RecordSink>,
        plan: PagePlan,
    ) -> Self {
        Self {
            source,
            extractor,
            sink,
            plan,
            sort_column: crate::infrastructure::config::defaults::SORT_COLUMN.to_string(),
            sort_direction: SortDirection::default(),
            page_delay: Duration::from_millis(crate::infrastructure::config::defaults::PAGE_DELAY_MS),
        }
    }

    /// Wire the HTTP fetcher, the configured extractor and the output file
    pub fn from_config(config: &HarvestConfig) -> HarvestResult<Self> {
        let plan = PagePlan::new(config.total_records, config.page_size)?;
        let source = Arc::new(FormPageFetcher::from_harvest_config(config)?);
        let extractor = build_extractor(config.extraction_mode)?;
        let sink = Arc::new(FileRecordSink::new(config.output_path.clone()));

        Ok(Self::new(source, extractor, sink, plan)
            .with_sort(config.sort_column.clone(), config.sort_direction)
            .with_page_delay(config.page_delay()))
    }

    #[must_use]
    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_column = column.into();
        self.sort_direction = direction;
        self
    }

    #[must_use]
    pub const fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Harvest every page once. Per-page failures end up in the report,
    /// never as an error.
    pub async fn run(&self) -> RunReport {
        let run_id = RunId::new();
        let span = info_span!("harvest_run", run_id = %run_id);
        self.run_pages(run_id).instrument(span).await
    }

    async fn run_pages(&self, run_id: RunId) -> RunReport {
        let started_at = Utc::now();
        let page_count = self.plan.page_count();
        let output_path = self.sink.location();

        info!(
            "Harvesting {} records in {} pages of {} into {:?}",
            self.plan.total_records(),
            page_count,
            self.plan.page_size(),
            output_path
        );

        let mut records: Vec<Record> = Vec::new();
        let mut outcomes = Vec::new();

        for (page, start_row) in self.plan.pages() {
            info!("Fetching page {} of {}...", page, page_count);

            match self.harvest_page(start_row, &mut records).await {
                Ok(found) => {
                    info!("Page {} yielded {} records ({} total)", page, found, records.len());
                    outcomes.push(PageOutcome::Succeeded {
                        page,
                        start_row,
                        records: found,
                    });

                    // no wait after the final page
                    if page < page_count && !self.page_delay.is_zero() {
                        debug!("Waiting {:?} before page {}", self.page_delay, page + 1);
                        sleep(self.page_delay).await;
                    }
                }
                Err(e) => {
                    error!("Error on page {}: {}", page, e);
                    outcomes.push(PageOutcome::Failed {
                        page,
                        start_row,
                        status: e.status(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Gathered {} records from {} pages into {:?}",
            records.len(),
            page_count,
            output_path
        );

        RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            output_path,
            page_count,
            outcomes,
            records,
        }
    }

    /// Fetch, extract and persist one page. Records stay accumulated even if
    /// the write fails; the next successful write includes them.
    async fn harvest_page(&self, start_row: u32, records: &mut Vec<Record>) -> HarvestResult<usize> {
        let request = PageRequest::new(self.sort_column.clone(), self.sort_direction, start_row);
        let html = self.source.fetch_page(&request).await?;

        let page_records = self.extractor.extract(&html);
        for record in &page_records {
            info!("{}", record);
        }

        let found = page_records.len();
        records.extend(page_records);
        self.sink.persist(records).await?;
        Ok(found)
    }
}
