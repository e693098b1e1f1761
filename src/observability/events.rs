//! Observability events for neodb
//!
//! Every lifecycle step of loading, linking, and querying the dataset
//! has an explicit, typed event.

use std::fmt;

/// Observable events in neodb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Extraction
    /// NEO records extracted
    NeosLoaded,
    /// Close approach records extracted
    ApproachesLoaded,

    // Linking
    /// Linking begins
    LinkBegin,
    /// Name index built
    NameIndexBuilt,
    /// Linking complete
    LinkComplete,
    /// An approach referenced an unknown NEO (FATAL)
    IntegrityViolation,

    // Verification
    /// Link verification begins
    VerifyBegin,
    /// Link verification complete
    VerifyComplete,

    // Query operations
    /// Query started
    QueryBegin,
    /// Query exhausted or abandoned by the consumer
    QueryComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::NeosLoaded => "NEOS_LOADED",
            Event::ApproachesLoaded => "APPROACHES_LOADED",

            Event::LinkBegin => "LINK_BEGIN",
            Event::NameIndexBuilt => "NAME_INDEX_BUILT",
            Event::LinkComplete => "LINK_COMPLETE",
            Event::IntegrityViolation => "INTEGRITY_VIOLATION",

            Event::VerifyBegin => "VERIFICATION_BEGIN",
            Event::VerifyComplete => "VERIFICATION_COMPLETE",

            Event::QueryBegin => "QUERY_BEGIN",
            Event::QueryComplete => "QUERY_COMPLETE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IntegrityViolation)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
