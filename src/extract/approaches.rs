//! Close approach extraction from the JPL CAD API JSON payload
//!
//! The payload is `{"fields": [...], "data": [[...], ...]}`. Columns are
//! located by name through `fields`:
//! - `des`: primary designation of the NEO
//! - `cd`: approach time, e.g. `1900-Jan-01 00:11`
//! - `dist`: nominal distance (au)
//! - `v_rel`: velocity relative to Earth (km/s)

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::model::CloseApproach;
use crate::observability::{log_event_with_fields, Event};

use super::errors::{ExtractError, ExtractResult};

/// Time format of the `cd` column
pub const CAD_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

#[derive(Debug, Deserialize)]
struct CadPayload {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Column positions of the fields we read
struct CadColumns {
    des: usize,
    cd: usize,
    dist: usize,
    v_rel: usize,
}

impl CadColumns {
    fn locate(fields: &[String], source: &str) -> ExtractResult<Self> {
        let find = |name: &str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| ExtractError::MissingField {
                    path: source.to_string(),
                    field: name.to_string(),
                })
        };

        Ok(Self {
            des: find("des")?,
            cd: find("cd")?,
            dist: find("dist")?,
            v_rel: find("v_rel")?,
        })
    }
}

/// Reads close approach records from a CAD JSON file, in file order
pub fn load_approaches(path: impl AsRef<Path>) -> ExtractResult<Vec<CloseApproach>> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| ExtractError::Io {
        path: source.clone(),
        source: e,
    })?;

    let approaches = parse_approaches(&content, &source)?;

    log_event_with_fields(
        Event::ApproachesLoaded,
        &[
            ("count", approaches.len().to_string().as_str()),
            ("path", source.as_str()),
        ],
    );

    Ok(approaches)
}

/// Parses close approach records from CAD JSON. `source` names the input in errors.
pub fn parse_approaches(content: &str, source: &str) -> ExtractResult<Vec<CloseApproach>> {
    let payload: CadPayload = serde_json::from_str(content).map_err(|e| ExtractError::Json {
        path: source.to_string(),
        source: e,
    })?;

    let columns = CadColumns::locate(&payload.fields, source)?;

    payload
        .data
        .iter()
        .enumerate()
        .map(|(index, row)| parse_row(row, &columns, source, index + 1))
        .collect()
}

fn parse_row(
    row: &[Value],
    columns: &CadColumns,
    source: &str,
    row_number: usize,
) -> ExtractResult<CloseApproach> {
    let text = |column: usize, field: &str| -> ExtractResult<String> {
        match row.get(column) {
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(ExtractError::invalid_row(
                source,
                row_number,
                format!("missing '{}'", field),
            )),
        }
    };

    let number = |column: usize, field: &str| -> ExtractResult<f64> {
        let raw = text(column, field)?;
        let value = raw.parse::<f64>().map_err(|e| {
            ExtractError::invalid_row(source, row_number, format!("{} '{}': {}", field, raw, e))
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ExtractError::invalid_row(
                source,
                row_number,
                format!("{} must be non-negative, got {}", field, value),
            ));
        }
        Ok(value)
    };

    let designation = text(columns.des, "des")?;
    if designation.is_empty() {
        return Err(ExtractError::invalid_row(source, row_number, "empty designation"));
    }

    let cd = text(columns.cd, "cd")?;
    let time = NaiveDateTime::parse_from_str(&cd, CAD_TIME_FORMAT).map_err(|e| {
        ExtractError::invalid_row(source, row_number, format!("cd '{}': {}", cd, e))
    })?;

    let distance = number(columns.dist, "dist")?;
    let velocity = number(columns.v_rel, "v_rel")?;

    Ok(CloseApproach::new(designation, time, distance, velocity))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
        "count": "2",
        "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
        "data": [
            ["170903", "105", "2415020.507669610", "1900-Jan-01 00:11", "0.0921795123769547", "0.0912006569517418", "0.0931589328621254", "16.7523040362574", "16.7505784933163", "01:00", "18.1"],
            ["2005 OE3", "52", "2415020.606013490", "1900-Jan-01 02:33", "0.414975519685102", "0.414968315685577", "0.414982724454678", "17.918395877175", "17.9166821054483", "< 00:01", "20.3"]
        ]
    }"#;

    #[test]
    fn test_parse_approaches() {
        let approaches = parse_approaches(SAMPLE_JSON, "cad.json").unwrap();
        assert_eq!(approaches.len(), 2);

        assert_eq!(approaches[0].designation, "170903");
        assert_eq!(approaches[0].time_str(), "1900-01-01 00:11");
        assert!((approaches[0].distance - 0.0921795123769547).abs() < 1e-12);
        assert!((approaches[1].velocity - 17.918395877175).abs() < 1e-9);
        assert!(approaches.iter().all(|ca| !ca.is_linked()));
    }

    #[test]
    fn test_missing_field() {
        let json = r#"{"fields": ["des", "cd", "dist"], "data": []}"#;
        let err = parse_approaches(json, "cad.json").unwrap_err();
        match err {
            ExtractError::MissingField { field, .. } => assert_eq!(field, "v_rel"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_time_rejected() {
        let json = r#"{"fields": ["des", "cd", "dist", "v_rel"],
                       "data": [["433", "1900-13-01 00:11", "0.1", "5.0"]]}"#;
        let err = parse_approaches(json, "cad.json").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let json = r#"{"fields": ["des", "cd", "dist", "v_rel"],
                       "data": [["433", "1900-Jan-01 00:11", "-0.1", "5.0"]]}"#;
        let err = parse_approaches(json, "cad.json").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_approaches("{not json", "cad.json").unwrap_err();
        assert_eq!(err.code(), "NEO_EXTRACT_JSON");
    }
}
