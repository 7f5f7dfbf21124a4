//! Pattern-based row parser
//!
//! Matches row and cell markers with non-greedy regexes over the raw text.
//! Cell contents are trimmed but otherwise left as-is: nested tags and
//! entities survive, and nested tables or attributes containing `>` confuse
//! the match. Use [`super::TableRowParser`] unless byte-compatible output
//! with older pattern-extracted files is required.

use regex::Regex;
use tracing::debug;

use crate::domain::{HarvestError, HarvestResult, Record, RecordExtractor};

const ROW_PATTERN: &str = r"<tr[^>]*>[\s\S]*?</tr>";
const CELL_PATTERN: &str = r"<td[^>]*>([\s\S]*?)</td>";

pub struct PatternRowParser {
    row: Regex,
    cell: Regex,
}

impl PatternRowParser {
    pub fn new() -> HarvestResult<Self> {
        Ok(Self {
            row: compile(ROW_PATTERN)?,
            cell: compile(CELL_PATTERN)?,
        })
    }
}

impl RecordExtractor for PatternRowParser {
    fn extract(&self, html: &str) -> Vec<Record> {
        let records: Vec<Record> = self
            .row
            .find_iter(html)
            .filter_map(|row| {
                let cells = self
                    .cell
                    .captures_iter(row.as_str())
                    .filter_map(|c| c.get(1))
                    .map(|m| m.as_str().trim().to_string());
                Record::from_cells(cells)
            })
            .collect();

        debug!("Pattern-extracted {} records", records.len());
        records
    }
}

fn compile(pattern: &str) -> HarvestResult<Regex> {
    Regex::new(pattern).map_err(|e| HarvestError::Config(format!("Invalid pattern '{pattern}': {e}")))
}
