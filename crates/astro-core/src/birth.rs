//! Birth data passed to a calculation.

use chrono::{NaiveDate, NaiveTime};

/// Normalized birth data for a single calculation call.
///
/// Reconstructed from a profile's stored birth fields on every calculation;
/// it has no lifecycle of its own. The place string is passed through to the
/// external engine, which does its own geocoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthInput {
    /// Civil date of birth.
    pub date: NaiveDate,
    /// Civil time of birth (minute precision).
    pub time: NaiveTime,
    /// Free-text birth place, e.g. "Chennai, India".
    pub place: String,
}

impl BirthInput {
    /// Create a birth input.
    pub fn new(date: NaiveDate, time: NaiveTime, place: impl Into<String>) -> Self {
        Self {
            date,
            time,
            place: place.into(),
        }
    }

    /// Canonical `YYYY-MM-DD` form dispatched to the engine.
    pub fn date_arg(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Canonical `HH:MM` form dispatched to the engine.
    pub fn time_arg(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}
