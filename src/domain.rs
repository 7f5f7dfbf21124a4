//! Domain module - records, page requests and pagination rules
//!
//! Everything in here is free of I/O. The service traits in [`services`]
//! are the seams the infrastructure layer plugs into.

pub mod errors;
pub mod pagination;
pub mod record;
pub mod report;
pub mod services;
pub mod value_objects;

// Re-export commonly used items for convenience
pub use errors::{HarvestError, HarvestResult};
pub use pagination::PagePlan;
pub use record::{PageRequest, Record, SortDirection, render_records};
pub use report::{PageOutcome, RunReport};
pub use services::{PageSource, RecordExtractor, RecordSink};
pub use value_objects::RunId;
