//! Linked read-only views over database records

use std::fmt;
use std::ops::Deref;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::model::{ApproachId, CloseApproach, NearEarthObject};

/// A close approach together with the NEO it is linked to.
///
/// Borrowed from a `NeoDatabase`; derefs to the underlying `CloseApproach`.
#[derive(Debug, Clone, Copy)]
pub struct ApproachRef<'a> {
    id: ApproachId,
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> ApproachRef<'a> {
    pub(crate) fn new(
        id: ApproachId,
        approach: &'a CloseApproach,
        neo: &'a NearEarthObject,
    ) -> Self {
        Self { id, approach, neo }
    }

    /// Handle of this approach in storage order
    pub fn id(&self) -> ApproachId {
        self.id
    }

    /// The underlying approach record
    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    /// The NEO making this approach
    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }
}

impl Deref for ApproachRef<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &Self::Target {
        self.approach
    }
}

impl PartialEq for ApproachRef<'_> {
    /// Identity: both views point at the same stored approach
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.approach, other.approach)
    }
}

impl Eq for ApproachRef<'_> {}

impl fmt::Display for ApproachRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}

impl Serialize for ApproachRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApproachRef", 4)?;
        state.serialize_field("datetime_utc", &self.approach.time_str())?;
        state.serialize_field("distance_au", &self.approach.distance)?;
        state.serialize_field("velocity_km_s", &self.approach.velocity)?;
        state.serialize_field("neo", self.neo)?;
        state.end()
    }
}
