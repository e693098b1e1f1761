//! Database error types
//!
//! Error codes:
//! - NEO_INTEGRITY_VIOLATION (FATAL)
//! - NEO_DUPLICATE_DESIGNATION (FATAL)
//! - NEO_LINK_INCONSISTENT (FATAL)
//!
//! A lookup miss is not an error; lookups return `None`.

use std::fmt;

/// Severity levels for database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Construction must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Database-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseErrorCode {
    /// A close approach references a designation with no NEO
    NeoIntegrityViolation,
    /// Two NEOs share a primary designation.
    ///
    /// Loaders that key NEOs by designation in a map keep the last row and
    /// never report this. `NeoDatabase::new` takes a plain sequence, so a
    /// repeated designation fails construction instead of replacing the
    /// earlier NEO.
    NeoDuplicateDesignation,
    /// Linked collections disagree with each other
    NeoLinkInconsistent,
}

impl DatabaseErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DatabaseErrorCode::NeoIntegrityViolation => "NEO_INTEGRITY_VIOLATION",
            DatabaseErrorCode::NeoDuplicateDesignation => "NEO_DUPLICATE_DESIGNATION",
            DatabaseErrorCode::NeoLinkInconsistent => "NEO_LINK_INCONSISTENT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal // All database errors are FATAL
    }

    /// Returns the invariant violated by this error
    pub fn invariant(&self) -> &'static str {
        match self {
            DatabaseErrorCode::NeoIntegrityViolation => "every approach resolves to a NEO",
            DatabaseErrorCode::NeoDuplicateDesignation => "designations are unique",
            DatabaseErrorCode::NeoLinkInconsistent => "NEO and approach links agree",
        }
    }
}

impl fmt::Display for DatabaseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Database error type with full context
#[derive(Debug, Clone)]
pub struct DatabaseError {
    /// Error code
    code: DatabaseErrorCode,
    /// Human-readable message
    message: String,
    /// Input position of the offending record, if applicable
    position: Option<usize>,
}

impl DatabaseError {
    /// Create an integrity violation error for an unresolved approach
    pub fn integrity_violation(position: usize, designation: &str) -> Self {
        Self {
            code: DatabaseErrorCode::NeoIntegrityViolation,
            message: format!(
                "Close approach #{} references unknown designation '{}'",
                position, designation
            ),
            position: Some(position),
        }
    }

    /// Create a duplicate designation error.
    ///
    /// `position` is the index of the second NEO carrying `designation`.
    pub fn duplicate_designation(position: usize, designation: &str) -> Self {
        Self {
            code: DatabaseErrorCode::NeoDuplicateDesignation,
            message: format!(
                "NEO #{} repeats designation '{}'",
                position, designation
            ),
            position: Some(position),
        }
    }

    /// Create a link inconsistency error
    pub fn link_inconsistent(reason: impl Into<String>) -> Self {
        Self {
            code: DatabaseErrorCode::NeoLinkInconsistent,
            message: reason.into(),
            position: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> DatabaseErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the invariant violated
    pub fn invariant(&self) -> &'static str {
        self.code.invariant()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the input position if applicable
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)?;
        write!(f, " [violates: {}]", self.code.invariant())?;
        Ok(())
    }
}

impl std::error::Error for DatabaseError {}

/// Result type for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
