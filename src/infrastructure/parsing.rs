//! HTML table parsing
//!
//! Two record extractors share the same selection rule (a row with at least
//! four cells becomes a record built from the first four):
//! - [`TableRowParser`]: structural, walks `tr`/`td` elements of the parsed DOM
//! - [`PatternRowParser`]: regex over the raw markup, for compatibility with
//!   the line-oriented extraction older exports were produced with

pub mod pattern_row_parser;
pub mod table_row_parser;

pub use pattern_row_parser::PatternRowParser;
pub use table_row_parser::TableRowParser;

use crate::domain::{HarvestResult, RecordExtractor};
use crate::infrastructure::config::ExtractionMode;

/// Build the extractor selected by configuration
pub fn build_extractor(mode: ExtractionMode) -> HarvestResult<Box<dyn RecordExtractor>> {
    Ok(match mode {
        ExtractionMode::Structural => Box::new(TableRowParser::new()?),
        ExtractionMode::Pattern => Box::new(PatternRowParser::new()?),
    })
}
