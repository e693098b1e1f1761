//! Near-Earth object record

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::ApproachId;

/// A near-Earth object.
///
/// `designation` is the primary key. `name` is `None` for unnamed objects;
/// an empty name is normalized to `None` on construction. An unknown
/// diameter is `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    /// Primary designation (unique, exact-match)
    pub designation: String,
    /// IAU name, if any
    pub name: Option<String>,
    /// Diameter in kilometers, `NaN` when unknown
    pub diameter: f64,
    /// Potentially hazardous asteroid flag
    pub hazardous: bool,
    /// Linked approaches in storage order, filled once during linking
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Creates an unlinked NEO
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Full name: `"433 (Eros)"`, or the bare designation when unnamed
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// Returns true if the diameter is known
    pub fn has_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }

    /// Handles of this NEO's close approaches, in storage order
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        if self.has_diameter() {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                self.diameter,
                hazard
            )
        } else {
            write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            )
        }
    }
}

impl Serialize for NearEarthObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NearEarthObject", 4)?;
        state.serialize_field("designation", &self.designation)?;
        state.serialize_field("name", self.name.as_deref().unwrap_or(""))?;
        // JSON has no NaN
        let diameter = if self.has_diameter() { Some(self.diameter) } else { None };
        state.serialize_field("diameter_km", &diameter)?;
        state.serialize_field("potentially_hazardous", &self.hazardous)?;
        state.end()
    }
}
