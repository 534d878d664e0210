//! Shared fixtures for report rendering tests

use crate::models::Observation;
use chrono::{DateTime, TimeZone, Utc};


/// 2020-03-01 12:00:00 UTC
pub fn observed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap()
}

/// 2020-03-01 12:05:30 UTC
pub fn received_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 3, 1, 12, 5, 30).unwrap()
}

/// The reference observation used across report tests
pub fn create_test_observation() -> Observation {
    Observation::new("obs1", observed_at())
        .with_received_at(received_at())
        .with_reporting_epoch(received_at().timestamp())
        .with_wind_waves("1.5", "6")
        .with_ice_thickness(0)
        .with_position("60.0", "5.0")
        .with_air_temperature("10")
}
