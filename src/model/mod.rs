//! Entity model for neodb
//!
//! Two plain record kinds:
//! - `NearEarthObject`: one astronomical body, keyed by primary designation
//! - `CloseApproach`: one timestamped pass of a NEO near Earth
//!
//! Both carry a link slot that stays empty until the database links them.
//! Links are arena handles (`NeoId`, `ApproachId`) into collections owned
//! by `NeoDatabase`, so neither record owns the other.

mod approach;
mod neo;

pub use approach::CloseApproach;
pub use neo::NearEarthObject;

use std::fmt;

/// Stable handle of a NEO inside a database's NEO arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    /// Position in the NEO arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neo#{}", self.0)
    }
}

/// Stable handle of a close approach inside a database's approach arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    /// Position in the approach arena (storage order)
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ApproachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approach#{}", self.0)
    }
}
