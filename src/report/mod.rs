//! Legacy fixed-column report rendering.
//!
//! Produces the hidden Orap message, the multi-line KL message and the KL
//! status line from an [`Observation`](crate::models::Observation). All
//! rendering is pure: the same observation always yields the same bytes.

pub mod formatter;
pub mod layout;
pub mod timestamp;

#[cfg(test)]
mod tests;

pub use formatter::{
    KlPatterns, ReportFormatter, ReportKind, hidden_kl_message, hidden_kl_status_line,
    hidden_message_line, orap_message_tag,
};
pub use layout::{KL_DATA_LAYOUT, Layout, OBSERVATION_LAYOUT, ObservationField, Slot};
pub use timestamp::TimestampPattern;
