//! Plain-text record file.
//!
//! The whole accumulated set is rendered and written on every call, so the
//! file always reflects every page completed so far.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::domain::{HarvestError, HarvestResult, Record, RecordSink, render_records};

pub struct FileRecordSink {
    path: PathBuf,
}

impl FileRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSink for FileRecordSink {
    async fn persist(&self, records: &[Record]) -> HarvestResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HarvestError::persist(parent, e))?;
        }

        let content = render_records(records);
        fs::write(&self.path, content.as_bytes())
            .await
            .map_err(|e| HarvestError::persist(&self.path, e))?;

        debug!("Wrote {} records to {:?}", records.len(), self.path);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
