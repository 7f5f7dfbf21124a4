//! Structural row parser
//!
//! Parses the response with `scraper` and reads every `tr` element's direct
//! `td` children in document order.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::{HarvestError, HarvestResult, Record, RecordExtractor};

/// Parser for extracting records from table rows
pub struct TableRowParser {
    row_selector: Selector,
}

impl TableRowParser {
    pub fn new() -> HarvestResult<Self> {
        Ok(Self {
            row_selector: compile_selector("tr")?,
        })
    }

    fn rows_in(&self, html: &Html) -> Vec<Record> {
        html.select(&self.row_selector)
            .filter_map(|row| Record::from_cells(cell_texts(row)))
            .collect()
    }
}

impl RecordExtractor for TableRowParser {
    fn extract(&self, html: &str) -> Vec<Record> {
        let document = Html::parse_document(html);
        let mut records = self.rows_in(&document);

        // Endpoints that return bare `<tr>` fragments lose their rows outside a
        // table context, so reparse inside one.
        if records.is_empty() && html.to_ascii_lowercase().contains("<tr") {
            let fragment = Html::parse_fragment(&format!("<table>{html}</table>"));
            records = self.rows_in(&fragment);
        }

        debug!("Extracted {} records from {} bytes of HTML", records.len(), html.len());
        records
    }
}

/// Trimmed text of each direct `td` child, skipping cells of nested tables
fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

fn compile_selector(selector: &str) -> HarvestResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| HarvestError::Config(format!("Invalid CSS selector '{selector}': {e}")))
}
