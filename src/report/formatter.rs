//! Legacy Orap and KL report rendering.

use super::layout::{KL_DATA_LAYOUT, OBSERVATION_LAYOUT};
use super::timestamp::TimestampPattern;
use crate::constants::{
    ACTION_TAG_DATE_FORMAT, HIDDEN_KL_MESSAGE_OBSERVATION_TIMESTAMP,
    HIDDEN_KL_MESSAGE_RECEIVED_FILE_NAME_TIMESTAMP, HIDDEN_KL_MESSAGE_RECEIVED_TIME_FORMAT,
    HIDDEN_MESSAGE_PREFIX, KL_COLUMN_HEADER, KL_INPUT_MARKER, KL_LOCAL_DATA_DIRECTORY,
    KL_LOCAL_DATA_MARKER, KL_STATUS_EPOCH_SCALE, KL_STATUS_SEPARATOR,
};
use crate::models::Observation;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Timestamp patterns used inside KL messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlPatterns {
    /// Received time in the `kldata` header line
    pub received_time: TimestampPattern,
    /// Observation time leading the data line
    pub observation_time: TimestampPattern,
    /// Received time in the kvalobs file name
    pub file_name_time: TimestampPattern,
}

impl Default for KlPatterns {
    fn default() -> Self {
        Self {
            received_time: TimestampPattern::builtin(HIDDEN_KL_MESSAGE_RECEIVED_TIME_FORMAT),
            observation_time: TimestampPattern::builtin(HIDDEN_KL_MESSAGE_OBSERVATION_TIMESTAMP),
            file_name_time: TimestampPattern::builtin(
                HIDDEN_KL_MESSAGE_RECEIVED_FILE_NAME_TIMESTAMP,
            ),
        }
    }
}

/// Report line kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Single hidden message line
    Hidden,
    /// Five-line KL message
    Kl,
    /// Scaled-epoch status line
    KlStatus,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Hidden => "hidden",
            ReportKind::Kl => "kl",
            ReportKind::KlStatus => "kl-status",
        };
        f.write_str(name)
    }
}

/// Hidden message line: station prefix, observation layout, blank line.
pub fn hidden_message_line(observation: &Observation) -> String {
    format!(
        "{}{}\n\n",
        HIDDEN_MESSAGE_PREFIX,
        OBSERVATION_LAYOUT.render(&observation.reporting_username, observation)
    )
}

/// KL message: header, column codes, data line, raw input line, local path.
///
/// Lines are joined by `\n`; the message ends with `;` and no newline.
pub fn hidden_kl_message(observation: &Observation, patterns: &KlPatterns) -> String {
    let username = &observation.reporting_username;
    let received = patterns.received_time.format_utc(&observation.received_at);
    let synop = patterns.observation_time.format_utc(&observation.observed_at);
    let file_time = patterns.file_name_time.format_utc(&observation.received_at);

    [
        format!("kldata/nationalnr={username}/type=317/test/received_time=\"{received}\""),
        KL_COLUMN_HEADER.to_string(),
        KL_DATA_LAYOUT.render(&synop, observation),
        format!(
            "{} {} {}",
            KL_INPUT_MARKER,
            observation.reporting_epoch_seconds,
            OBSERVATION_LAYOUT.render(username, observation)
        ),
        format!(
            "{KL_LOCAL_DATA_MARKER} {KL_LOCAL_DATA_DIRECTORY}/{username}/orap_{file_time}.txt;"
        ),
    ]
    .join("\n")
}

/// KL status line: epoch scaled by ten, separator, hidden message body.
pub fn hidden_kl_status_line(observation_epoch: i64, observation: &Observation) -> String {
    format!(
        "{}{}{}{}\n",
        observation_epoch.saturating_mul(KL_STATUS_EPOCH_SCALE),
        KL_STATUS_SEPARATOR,
        HIDDEN_MESSAGE_PREFIX,
        OBSERVATION_LAYOUT.render(&observation.reporting_username, observation)
    )
}

/// Orap action tag `<date>_<username>.debug`, dated in the zone given.
pub fn orap_message_tag<Tz>(datetime: &DateTime<Tz>, username: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let date = TimestampPattern::builtin(ACTION_TAG_DATE_FORMAT).format_local(datetime);
    format!("{date}_{username}.debug")
}

/// Renders any report kind with a fixed set of patterns
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    patterns: KlPatterns,
}

impl ReportFormatter {
    pub fn new(patterns: KlPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &KlPatterns {
        &self.patterns
    }

    /// Render `kind` for `observation`. Status lines use the observation time
    /// as their epoch.
    pub fn render(&self, kind: ReportKind, observation: &Observation) -> String {
        debug!(
            "Rendering {} report for {}",
            kind, observation.reporting_username
        );

        match kind {
            ReportKind::Hidden => hidden_message_line(observation),
            ReportKind::Kl => hidden_kl_message(observation, &self.patterns),
            ReportKind::KlStatus => {
                hidden_kl_status_line(observation.observed_at.timestamp(), observation)
            }
        }
    }
}
