//! Configuration infrastructure
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults (see [`defaults`])
//! 2. Optional config file (`harvest.toml`, or the path in `HARVEST_CONFIG`)
//! 3. `HARVEST__*` environment variables, `__` separating nested keys

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::domain::SortDirection;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Which record extractor the driver uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// DOM-based extraction of `tr` / `td` elements
    #[default]
    Structural,
    /// Regex extraction, kept for compatibility with line-oriented markup
    Pattern,
}

/// Complete harvest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Endpoint accepting the form POST
    pub target_url: String,

    /// Session cookie sent with every request
    pub credential: String,

    /// Client identifier sent as the User-Agent header
    pub user_agent: String,

    /// Known total number of records; drives the page count
    pub total_records: u32,

    /// Records returned per page
    pub page_size: u32,

    pub sort_column: String,
    pub sort_direction: SortDirection,

    /// File rewritten with the accumulated records after each page
    pub output_path: PathBuf,

    /// Delay between pages in milliseconds
    pub page_delay_ms: u64,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    pub extraction_mode: ExtractionMode,

    pub logging: LoggingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Enable JSON formatted logs (file output only)
    pub json_format: bool,

    /// Directory for the log file
    pub log_dir: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            target_url: defaults::TARGET_URL.to_string(),
            credential: defaults::CREDENTIAL.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            total_records: defaults::TOTAL_RECORDS,
            page_size: defaults::PAGE_SIZE,
            sort_column: defaults::SORT_COLUMN.to_string(),
            sort_direction: SortDirection::Ascending,
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            page_delay_ms: defaults::PAGE_DELAY_MS,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            extraction_mode: ExtractionMode::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            json_format: defaults::LOG_JSON_FORMAT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
        }
    }
}

impl HarvestConfig {
    /// Load from the default location: `HARVEST_CONFIG` or `harvest.toml`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(defaults::CONFIG_PATH_ENV)
            .unwrap_or_else(|_| defaults::CONFIG_FILE.to_string());
        Self::from_file(&path)
    }

    /// Load from a config file (optional) plus the environment
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate setting values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(validation("page_size must be greater than 0"));
        }

        let url = Url::parse(&self.target_url)
            .map_err(|e| validation(&format!("target_url '{}' is invalid: {e}", self.target_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(validation(&format!(
                "target_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.sort_column.trim().is_empty() {
            return Err(validation("sort_column must not be empty"));
        }

        for (field, value) in [("credential", &self.credential), ("user_agent", &self.user_agent)] {
            if reqwest::header::HeaderValue::from_str(value).is_err() {
                return Err(validation(&format!("{field} is not a valid header value")));
            }
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(validation("output_path must not be empty"));
        }

        Ok(())
    }

    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}

/// Default harvest configuration values
pub mod defaults {
    /// Environment variable naming the config file
    pub const CONFIG_PATH_ENV: &str = "HARVEST_CONFIG";

    /// Config file looked up when `HARVEST_CONFIG` is unset (extension optional)
    pub const CONFIG_FILE: &str = "harvest";

    /// Prefix for environment overrides, e.g. `HARVEST__PAGE_SIZE`
    pub const ENV_PREFIX: &str = "HARVEST";

    pub const TARGET_URL: &str = "https://example.com/someEndpoint";

    /// Placeholder; replace with the cookie of an authenticated session
    pub const CREDENTIAL: &str = "YOUR_COOKIE_HERE";

    pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; NodeFetchBot/1.0)";

    pub const TOTAL_RECORDS: u32 = 100;

    pub const PAGE_SIZE: u32 = 50;

    pub const SORT_COLUMN: &str = "LastName";

    pub const OUTPUT_PATH: &str = "member_records.txt";

    /// Delay between pages in milliseconds
    pub const PAGE_DELAY_MS: u64 = 2000;

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    // Log configuration defaults
    pub const LOG_LEVEL: &str = "info";

    pub const LOG_CONSOLE_OUTPUT: bool = true;

    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_JSON_FORMAT: bool = false;

    pub const LOG_DIR: &str = "logs";
}
