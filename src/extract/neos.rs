//! NEO extraction from the SBDB CSV export
//!
//! Only four columns are read; the rest are ignored:
//! - `pdes`: primary designation (required, non-empty)
//! - `name`: IAU name, empty when unnamed
//! - `pha`: `Y` marks a potentially hazardous asteroid
//! - `diameter`: kilometers, empty when unknown

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::model::NearEarthObject;
use crate::observability::{log_event_with_fields, Event};

use super::errors::{ExtractError, ExtractResult};

/// Header columns that must be present, in check order
const REQUIRED_COLUMNS: [&str; 4] = ["pdes", "name", "pha", "diameter"];

/// Empty cells fall back to defaults; absent columns are rejected up front
#[derive(Debug, Deserialize)]
struct NeoCsvRow {
    #[serde(default)]
    pdes: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    pha: String,
    #[serde(default)]
    diameter: String,
}

impl NeoCsvRow {
    fn into_neo(self, source: &str, row: usize) -> ExtractResult<NearEarthObject> {
        let designation = self.pdes.trim();
        if designation.is_empty() {
            return Err(ExtractError::invalid_row(source, row, "empty designation"));
        }

        let name = Some(self.name.trim().to_string()).filter(|n| !n.is_empty());

        let diameter = match self.diameter.trim() {
            "" => f64::NAN,
            raw => raw.parse::<f64>().map_err(|e| {
                ExtractError::invalid_row(source, row, format!("diameter '{}': {}", raw, e))
            })?,
        };

        let hazardous = self.pha.trim() == "Y";

        Ok(NearEarthObject::new(designation, name, diameter, hazardous))
    }
}

/// Reads NEO records from a CSV file, in file order
pub fn load_neos(path: impl AsRef<Path>) -> ExtractResult<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let file = File::open(path).map_err(|e| ExtractError::Io {
        path: source.clone(),
        source: e,
    })?;

    let neos = parse_neos(file, &source)?;

    log_event_with_fields(
        Event::NeosLoaded,
        &[
            ("count", neos.len().to_string().as_str()),
            ("path", source.as_str()),
        ],
    );

    Ok(neos)
}

/// Parses NEO records from CSV content. `source` names the input in errors.
pub fn parse_neos<R: Read>(reader: R, source: &str) -> ExtractResult<Vec<NearEarthObject>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| ExtractError::Csv {
        path: source.to_string(),
        source: e,
    })?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ExtractError::MissingField {
            path: source.to_string(),
            field: missing.to_string(),
        });
    }

    let mut neos = Vec::new();

    for (index, result) in reader.deserialize::<NeoCsvRow>().enumerate() {
        let row = result.map_err(|e| ExtractError::Csv {
            path: source.to_string(),
            source: e,
        })?;
        neos.push(row.into_neo(source, index + 1)?);
    }

    Ok(neos)
}
