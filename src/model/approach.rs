//! Close approach record

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::NeoId;

/// Display format for approach times
pub(crate) const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A close approach of a NEO to Earth.
///
/// `designation` is the unresolved reference to the owning NEO. After the
/// database links the dataset, `neo_id()` returns the handle of that NEO.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    /// Primary designation of the approaching NEO
    pub designation: String,
    /// Time of closest approach
    pub time: NaiveDateTime,
    /// Nominal approach distance in astronomical units
    pub distance: f64,
    /// Velocity relative to Earth in km/s
    pub velocity: f64,
    /// Owning NEO, set during linking
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    /// Creates an unlinked close approach
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Handle of the owning NEO, `None` before linking
    pub fn neo_id(&self) -> Option<NeoId> {
        self.neo
    }

    /// Returns true once the approach has been linked to its NEO
    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    /// Approach time formatted as `YYYY-MM-DD HH:MM`
    pub fn time_str(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}

impl Serialize for CloseApproach {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CloseApproach", 3)?;
        state.serialize_field("datetime_utc", &self.time_str())?;
        state.serialize_field("distance_au", &self.distance)?;
        state.serialize_field("velocity_km_s", &self.velocity)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_new_approach_is_unlinked() {
        let ca = CloseApproach::new("433", at(2020, 1, 1, 12, 30), 0.15, 5.0);
        assert!(!ca.is_linked());
        assert_eq!(ca.neo_id(), None);
    }

    #[test]
    fn test_time_str() {
        let ca = CloseApproach::new("433", at(1900, 12, 27, 1, 30), 0.15, 5.0);
        assert_eq!(ca.time_str(), "1900-12-27 01:30");
    }

    #[test]
    fn test_serialize_fields() {
        let ca = CloseApproach::new("433", at(2020, 1, 1, 0, 0), 0.25, 7.5);
        let value = serde_json::to_value(&ca).unwrap();
        assert_eq!(value["datetime_utc"], "2020-01-01 00:00");
        assert_eq!(value["distance_au"], 0.25);
        assert_eq!(value["velocity_km_s"], 7.5);
    }
}
