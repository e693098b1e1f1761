//! Extraction errors

use thiserror::Error;

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors raised while reading source files into records
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field '{field}' in {path}")]
    MissingField { path: String, field: String },

    #[error("Invalid row {row} in {path}: {reason}")]
    InvalidRow {
        path: String,
        row: usize,
        reason: String,
    },
}

impl ExtractError {
    /// Short error code for CLI output
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::Io { .. } => "NEO_EXTRACT_IO",
            ExtractError::Csv { .. } => "NEO_EXTRACT_CSV",
            ExtractError::Json { .. } => "NEO_EXTRACT_JSON",
            ExtractError::MissingField { .. } => "NEO_EXTRACT_MISSING_FIELD",
            ExtractError::InvalidRow { .. } => "NEO_EXTRACT_INVALID_ROW",
        }
    }

    pub(crate) fn invalid_row(path: &str, row: usize, reason: impl Into<String>) -> Self {
        ExtractError::InvalidRow {
            path: path.to_string(),
            row,
            reason: reason.into(),
        }
    }
}
