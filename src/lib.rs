//! Paged Harvester - paginated form-POST table harvesting
//!
//! Requests a table page by page with a form-encoded POST, extracts four-cell
//! records from each response and keeps an output file in sync with
//! everything gathered so far.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the types most callers need
pub use application::HarvestDriver;
pub use domain::{HarvestError, HarvestResult, PageOutcome, PagePlan, Record, RunReport};
pub use infrastructure::{HarvestConfig, init_logging_with_config};
