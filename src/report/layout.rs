//! Named slot tables for the comma-separated legacy layouts.
//!
//! Every Orap line is a fixed sequence of comma-separated slots. The
//! downstream parser reads them by position, so each layout is declared as a
//! table and the exact slot count is part of its contract.

use crate::constants::{FIELD_SEPARATOR, HIDDEN_MESSAGE_TYPE_CODE, KL_DATA_FLAG, KL_DATA_TRAILER};
use crate::models::Observation;
use std::borrow::Cow;
use std::fmt;
use tracing::trace;

/// Observation values that occupy a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationField {
    WindWaveHeight,
    WindWavePeriod,
    IceThickness,
    Latitude,
    Longitude,
    AirTemperature,
}

impl ObservationField {
    pub const ALL: [ObservationField; 6] = [
        ObservationField::WindWaveHeight,
        ObservationField::WindWavePeriod,
        ObservationField::IceThickness,
        ObservationField::Latitude,
        ObservationField::Longitude,
        ObservationField::AirTemperature,
    ];

    /// Text rendered for this field
    pub fn value<'a>(&self, observation: &'a Observation) -> Cow<'a, str> {
        match self {
            ObservationField::WindWaveHeight => Cow::Borrowed(&observation.wind_wave_height_meters),
            ObservationField::WindWavePeriod => {
                Cow::Borrowed(&observation.wind_wave_period_seconds)
            }
            ObservationField::IceThickness => Cow::Owned(observation.ice_thickness_cm.to_string()),
            ObservationField::Latitude => Cow::Borrowed(&observation.latitude),
            ObservationField::Longitude => Cow::Borrowed(&observation.longitude),
            ObservationField::AirTemperature => Cow::Borrowed(&observation.air_temperature),
        }
    }
}

/// One entry of a layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The line-specific leading value (username or timestamp)
    Lead,
    /// A fixed token
    Literal(&'static str),
    /// An observation value
    Field(ObservationField),
    /// A run of empty slots
    Empty(usize),
}

impl Slot {
    fn width(&self) -> usize {
        match self {
            Slot::Empty(count) => *count,
            _ => 1,
        }
    }
}

/// An ordered slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub slots: &'static [Slot],
}

/// Username line shared by the hidden message, the KL input line and the
/// status line. 39 slots.
pub const OBSERVATION_LAYOUT: Layout = Layout {
    name: "observation",
    slots: &[
        Slot::Lead,
        Slot::Literal(HIDDEN_MESSAGE_TYPE_CODE),
        Slot::Empty(10),
        Slot::Field(ObservationField::WindWaveHeight),
        Slot::Field(ObservationField::WindWavePeriod),
        Slot::Empty(14),
        Slot::Field(ObservationField::IceThickness),
        Slot::Empty(1),
        Slot::Field(ObservationField::Latitude),
        Slot::Field(ObservationField::Longitude),
        Slot::Field(ObservationField::AirTemperature),
        Slot::Empty(6),
    ],
};

/// Timestamped KL data line. 41 slots.
pub const KL_DATA_LAYOUT: Layout = Layout {
    name: "kl-data",
    slots: &[
        Slot::Lead,
        Slot::Literal(KL_DATA_FLAG),
        Slot::Empty(10),
        Slot::Field(ObservationField::WindWaveHeight),
        Slot::Field(ObservationField::WindWavePeriod),
        Slot::Empty(14),
        Slot::Field(ObservationField::IceThickness),
        Slot::Empty(1),
        Slot::Field(ObservationField::Latitude),
        Slot::Field(ObservationField::Longitude),
        Slot::Field(ObservationField::AirTemperature),
        Slot::Literal(KL_DATA_TRAILER),
        Slot::Empty(7),
    ],
};

impl Layout {
    /// Total number of comma-separated slots
    pub fn slot_count(&self) -> usize {
        self.slots.iter().map(Slot::width).sum()
    }

    /// Number of separators in a rendered line
    pub fn separator_count(&self) -> usize {
        self.slot_count().saturating_sub(1)
    }

    /// Zero-based slot index of `field`
    pub fn position_of(&self, field: ObservationField) -> Option<usize> {
        let mut position = 0;
        for slot in self.slots {
            if *slot == Slot::Field(field) {
                return Some(position);
            }
            position += slot.width();
        }
        None
    }

    /// Expand the table into one cell per slot
    pub fn cells<'a>(&self, lead: &'a str, observation: &'a Observation) -> Vec<Cow<'a, str>> {
        let mut cells = Vec::with_capacity(self.slot_count());
        for slot in self.slots {
            match slot {
                Slot::Lead => cells.push(Cow::Borrowed(lead)),
                Slot::Literal(token) => cells.push(Cow::Borrowed(*token)),
                Slot::Field(field) => cells.push(field.value(observation)),
                Slot::Empty(count) => {
                    cells.extend(std::iter::repeat_n(Cow::Borrowed(""), *count))
                }
            }
        }
        cells
    }

    /// Render the comma-joined line without any terminator
    pub fn render(&self, lead: &str, observation: &Observation) -> String {
        trace!("Rendering {} layout", self);
        let mut line = String::new();
        for (index, cell) in self.cells(lead, observation).iter().enumerate() {
            if index > 0 {
                line.push(FIELD_SEPARATOR);
            }
            line.push_str(cell);
        }
        line
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} slots)", self.name, self.slot_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn observation() -> Observation {
        Observation::new("obs1", Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap())
            .with_wind_waves("1.5", "6")
            .with_ice_thickness(0)
            .with_position("60.0", "5.0")
            .with_air_temperature("10")
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(OBSERVATION_LAYOUT.slot_count(), 39);
        assert_eq!(KL_DATA_LAYOUT.slot_count(), 41);
        assert_eq!(OBSERVATION_LAYOUT.separator_count(), 38);
    }

    #[test]
    fn test_display_names_layout() {
        assert_eq!(OBSERVATION_LAYOUT.to_string(), "observation (39 slots)");
        assert_eq!(KL_DATA_LAYOUT.to_string(), "kl-data (41 slots)");
    }

    #[test]
    fn test_field_positions() {
        let layout = OBSERVATION_LAYOUT;
        assert_eq!(layout.position_of(ObservationField::WindWaveHeight), Some(12));
        assert_eq!(layout.position_of(ObservationField::WindWavePeriod), Some(13));
        assert_eq!(layout.position_of(ObservationField::IceThickness), Some(28));
        assert_eq!(layout.position_of(ObservationField::Latitude), Some(30));
        assert_eq!(layout.position_of(ObservationField::Longitude), Some(31));
        assert_eq!(layout.position_of(ObservationField::AirTemperature), Some(32));
    }

    #[test]
    fn test_layouts_share_field_positions() {
        for field in ObservationField::ALL {
            assert_eq!(
                OBSERVATION_LAYOUT.position_of(field),
                KL_DATA_LAYOUT.position_of(field),
                "{field:?} must sit at the same slot in both layouts"
            );
        }
    }

    #[test]
    fn test_render_observation_layout() {
        let line = OBSERVATION_LAYOUT.render("obs1", &observation());
        assert_eq!(
            line,
            "obs1,17,,,,,,,,,,,1.5,6,,,,,,,,,,,,,,,0,,60.0,5.0,10,,,,,,"
        );
    }

    #[test]
    fn test_render_kl_data_layout() {
        let line = KL_DATA_LAYOUT.render("20200301120000", &observation());
        assert_eq!(
            line,
            "20200301120000,3,,,,,,,,,,,1.5,6,,,,,,,,,,,,,,,0,,60.0,5.0,10,-6,,,,,,,"
        );
    }

    #[test]
    fn test_empty_values_stay_empty() {
        let blank = Observation::new("", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let line = OBSERVATION_LAYOUT.render("", &blank);
        assert_eq!(line.matches(',').count(), 38);
        assert!(!line.contains("null"));
    }
}
