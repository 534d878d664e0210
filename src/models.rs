//! Core data structures for observation reporting.
//!
//! Defines the observation record rendered into legacy reports, the
//! echogram and snap message records exchanged with the REST service, and
//! the session identity used by the result cache.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single sea-ice / wind-wave observation ready for reporting.
///
/// Numeric fields that the legacy formats carry as text are pre-formatted by
/// the caller; the formatter positions them without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub reporting_username: String,
    pub observed_at: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
    pub wind_wave_height_meters: String,
    pub wind_wave_period_seconds: String,
    pub ice_thickness_cm: i32,
    pub latitude: String,
    pub longitude: String,
    pub air_temperature: String,
    pub reporting_epoch_seconds: i64,
    /// Offset of the observer's clock at `observed_at`, east of UTC
    #[serde(default)]
    pub observer_utc_offset_seconds: i32,
}

impl Observation {
    /// Create an observation observed and received at `at`, with empty
    /// measurement fields.
    pub fn new(reporting_username: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            reporting_username: reporting_username.into(),
            observed_at: at,
            received_at: at,
            wind_wave_height_meters: String::new(),
            wind_wave_period_seconds: String::new(),
            ice_thickness_cm: 0,
            latitude: String::new(),
            longitude: String::new(),
            air_temperature: String::new(),
            reporting_epoch_seconds: at.timestamp(),
            observer_utc_offset_seconds: 0,
        }
    }

    /// Set the observation time, remembering the observer's offset
    pub fn with_observed_at<Tz: TimeZone>(mut self, at: DateTime<Tz>) -> Self {
        self.observer_utc_offset_seconds = at.offset().fix().local_minus_utc();
        self.observed_at = at.with_timezone(&Utc);
        self
    }

    /// Observation time on the observer's clock
    pub fn observed_local(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.observer_utc_offset_seconds)
            .unwrap_or_else(|| Utc.fix());
        self.observed_at.with_timezone(&offset)
    }

    pub fn with_wind_waves(
        mut self,
        height_meters: impl Into<String>,
        period_seconds: impl Into<String>,
    ) -> Self {
        self.wind_wave_height_meters = height_meters.into();
        self.wind_wave_period_seconds = period_seconds.into();
        self
    }

    pub fn with_ice_thickness(mut self, centimeters: i32) -> Self {
        self.ice_thickness_cm = centimeters;
        self
    }

    pub fn with_position(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude = latitude.into();
        self.longitude = longitude.into();
        self
    }

    pub fn with_air_temperature(mut self, air_temperature: impl Into<String>) -> Self {
        self.air_temperature = air_temperature.into();
        self
    }

    pub fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    pub fn with_reporting_epoch(mut self, epoch_seconds: i64) -> Self {
        self.reporting_epoch_seconds = epoch_seconds;
        self
    }
}

/// Metadata for a shared echogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchogramInfo {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub echogram_url: Option<String>,
    #[serde(default)]
    pub data_url: Option<String>,
}

/// An annotation message sent between users, optionally referring to an echogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapMessage {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub sender: String,
    #[serde(default)]
    pub receivers: Vec<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub sent_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub echogram_info_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echogram_info: Option<EchogramInfo>,
}

/// Identity of a consumer whose fetched results are cached together
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
