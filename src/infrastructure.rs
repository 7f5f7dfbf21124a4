//! Infrastructure layer for HTTP access, HTML parsing and file output
//!
//! Concrete implementations of the domain service traits, plus the
//! configuration and logging setup shared by the binary and the tests.

pub mod config; // Layered configuration (defaults, file, environment)
pub mod http_client; // Form POST page fetcher
pub mod logging; // Logging infrastructure
pub mod parsing; // Table row extractors
pub mod record_file; // Output file sink

// Re-export commonly used items
pub use config::{ConfigError, ExtractionMode, HarvestConfig, LoggingConfig};
pub use http_client::{FetcherConfig, FormPageFetcher};
pub use logging::init_logging_with_config;
pub use parsing::{PatternRowParser, TableRowParser, build_extractor};
pub use record_file::FileRecordSink;
