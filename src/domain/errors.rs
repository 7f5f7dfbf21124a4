//! Harvest error types
//!
//! One enum covers every failure that can end a single page iteration.
//! The driver turns these into failed page outcomes instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Request failed with status {status}: {url}")]
    RequestFailed { status: u16, url: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid page request: {0}")]
    InvalidRequest(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HarvestError {
    /// Create a request failed error from a response status
    pub fn request_failed(status: u16, url: &str) -> Self {
        Self::RequestFailed {
            status,
            url: url.to_string(),
        }
    }

    /// Create a persistence error for the given output path
    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// HTTP status code, if this error came from a non-success response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_carries_status() {
        let err = HarvestError::request_failed(503, "https://example.com/list");
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Request failed with status 503: https://example.com/list"
        );
    }

    #[test]
    fn persist_error_names_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HarvestError::persist("out/records.txt", io);
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("Failed to write out/records.txt"));
    }
}
