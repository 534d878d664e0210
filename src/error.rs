//! Error handling for report rendering and service access.
//!
//! Formatting itself is total over its inputs; the failures here come from
//! producer misuse (bad timestamp patterns, bad configuration) and from the
//! HTTP transport.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid timestamp pattern: '{pattern}'")]
    InvalidPattern { pattern: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Configuration file not readable: {path} - {reason}")]
    ConfigFile { path: PathBuf, reason: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },
}

impl ReporterError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReporterError>;
