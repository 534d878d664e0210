//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! environment variables, then command-line overrides applied by the CLI.

use crate::constants::{
    BOUNDARY_ID_LENGTH, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ORAP_SERVER_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SNAP_API_URL, ENV_ORAP_SERVER_URL, ENV_SNAP_API_URL,
    ORAP_OBS_REPORT, ORAP_PATH_PREFIX, WEBKIT_BOUNDARY_PREFIX,
};
use crate::error::{ReporterError, Result};
use crate::report::KlPatterns;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// RFC 2046 caps a multipart boundary at 70 characters
const MAX_BOUNDARY_LENGTH: usize = 70;

/// Global configuration for report submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Base URL of the Orap server receiving observation reports
    pub orap_server_url: String,

    /// Base URL of the snap message REST API
    pub snap_api_url: String,

    /// Random characters in each multipart boundary id
    pub boundary_id_length: usize,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Timestamp patterns for KL messages
    pub kl_patterns: KlPatterns,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            orap_server_url: DEFAULT_ORAP_SERVER_URL.to_string(),
            snap_api_url: DEFAULT_SNAP_API_URL.to_string(),
            boundary_id_length: BOUNDARY_ID_LENGTH,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            kl_patterns: KlPatterns::default(),
        }
    }
}

impl ReporterConfig {
    /// Set the Orap server URL
    pub fn with_orap_server_url(mut self, url: impl Into<String>) -> Self {
        self.orap_server_url = url.into();
        self
    }

    /// Set the snap API base URL
    pub fn with_snap_api_url(mut self, url: impl Into<String>) -> Self {
        self.snap_api_url = url.into();
        self
    }

    /// Set the boundary id length
    pub fn with_boundary_id_length(mut self, length: usize) -> Self {
        self.boundary_id_length = length;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Replace the KL timestamp patterns
    pub fn with_kl_patterns(mut self, patterns: KlPatterns) -> Self {
        self.kl_patterns = patterns;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Platform location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReporterError::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReporterError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ReporterError::ConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_ORAP_SERVER_URL).filter(|v| !v.is_empty()) {
            debug!("{} overrides Orap server URL", ENV_ORAP_SERVER_URL);
            self.orap_server_url = url;
        }
        if let Some(url) = lookup(ENV_SNAP_API_URL).filter(|v| !v.is_empty()) {
            debug!("{} overrides snap API URL", ENV_SNAP_API_URL);
            self.snap_api_url = url;
        }
    }

    /// Load defaults, then the config file if given, then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                info!("Using config file: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Check URLs and boundary sizing
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("orap_server_url", &self.orap_server_url),
            ("snap_api_url", &self.snap_api_url),
        ] {
            Url::parse(value).map_err(|e| {
                ReporterError::configuration(format!("{name} '{value}' is not a valid URL: {e}"))
            })?;
        }

        validate_boundary_id_length(self.boundary_id_length)?;

        if self.request_timeout_secs == 0 {
            return Err(ReporterError::configuration(
                "request_timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Observation report endpoint on the Orap server
    pub fn obs_report_url(&self) -> Result<Url> {
        let url = format!(
            "{}{}{}",
            self.orap_server_url.trim_end_matches('/'),
            ORAP_PATH_PREFIX,
            ORAP_OBS_REPORT
        );
        Ok(Url::parse(&url)?)
    }

    /// Base URL of the snap API, always ending in `/` so that resource paths
    /// join below it
    pub fn snap_api_base(&self) -> Result<Url> {
        let mut base = self.snap_api_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?)
    }
}

/// Boundary ids must be non-empty and keep the full boundary within the
/// RFC 2046 limit
pub fn validate_boundary_id_length(length: usize) -> Result<()> {
    let max_id_length = MAX_BOUNDARY_LENGTH - WEBKIT_BOUNDARY_PREFIX.len();
    if length == 0 || length > max_id_length {
        return Err(ReporterError::configuration(format!(
            "boundary_id_length must be between 1 and {}, got {}",
            max_id_length, length
        )));
    }
    Ok(())
}
