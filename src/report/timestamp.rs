//! Validated timestamp patterns.
//!
//! Report timestamps are always normalized to UTC before formatting so that
//! lines from different devices compare equal for the same instant. chrono's
//! formatter has no locale dependency, so the only remaining variable is the
//! source offset, which `format_utc` removes.

use crate::error::{ReporterError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strftime pattern that is known to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampPattern(String);

impl TimestampPattern {
    /// Parse a pattern, rejecting any unknown or truncated specifier.
    pub fn parse(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ReporterError::invalid_pattern(pattern));
        }
        Ok(Self(pattern))
    }

    /// Wrap one of the built-in pattern constants.
    pub(crate) fn builtin(pattern: &'static str) -> Self {
        debug_assert!(
            Self::parse(pattern).is_ok(),
            "built-in pattern '{pattern}' must parse"
        );
        Self(pattern.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format the instant in UTC, whatever zone it was given in.
    pub fn format_utc<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String {
        datetime.with_timezone(&Utc).format(&self.0).to_string()
    }

    /// Format the instant in its own zone.
    pub fn format_local<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        datetime.format(&self.0).to_string()
    }
}

impl TryFrom<String> for TimestampPattern {
    type Error = ReporterError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<TimestampPattern> for String {
    fn from(pattern: TimestampPattern) -> Self {
        pattern.0
    }
}

impl fmt::Display for TimestampPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_rejects_unknown_specifier() {
        let err = TimestampPattern::parse("%Y-%Q").unwrap_err();
        assert!(matches!(err, ReporterError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rejects_dangling_percent() {
        assert!(TimestampPattern::parse("%Y%m%").is_err());
    }

    #[test]
    fn test_accepts_literal_text() {
        let pattern = TimestampPattern::parse("day %d at %H").unwrap();
        let at = Utc.with_ymd_and_hms(2021, 1, 5, 7, 0, 0).unwrap();
        assert_eq!(pattern.format_utc(&at), "day 05 at 07");
    }

    #[test]
    fn test_utc_normalization() {
        let pattern = TimestampPattern::parse("%Y%m%d%H%M%S").unwrap();
        let oslo = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = oslo.with_ymd_and_hms(2021, 6, 1, 1, 30, 0).unwrap();

        assert_eq!(pattern.format_utc(&local), "20210531233000");
        assert_eq!(pattern.format_local(&local), "20210601013000");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TimestampPattern = serde_json::from_str("\"%H:%M\"").unwrap();
        assert_eq!(ok.as_str(), "%H:%M");
        assert!(serde_json::from_str::<TimestampPattern>("\"%H:%\"").is_err());
    }
}
