//! Linking and indexing for neodb
//!
//! Turns two independently extracted, unlinked collections into one
//! cross-referenced dataset.
//!
//! # Algorithm
//!
//! 1. Designation index, one pass over NEOs. Duplicates are FATAL.
//! 2. Name index, one pass over NEOs in the same order. Unnamed NEOs are
//!    skipped; on a name collision the later NEO wins.
//! 3. One pass over approaches in storage order: resolve the designation,
//!    set the approach's NEO handle, append the approach to that NEO.
//!    An unresolved designation is FATAL.
//!
//! Linking either fully succeeds or returns an error; the inputs are
//! consumed, so a partially linked dataset is never observable.

use std::collections::HashMap;

use crate::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::observability::{log_event_with_fields, trace_event_with_fields, Event};

use super::errors::{DatabaseError, DatabaseResult};

/// Fully linked and indexed collections
#[derive(Debug)]
pub(crate) struct LinkedCollections {
    /// NEO arena in extraction order
    pub neos: Vec<NearEarthObject>,
    /// Approach arena in extraction order
    pub approaches: Vec<CloseApproach>,
    /// Designation -> NEO handle
    pub designation_index: HashMap<String, NeoId>,
    /// Name -> designation, named NEOs only
    pub name_index: HashMap<String, String>,
}

/// Links NEOs and close approaches and builds the lookup indexes.
pub(crate) fn link(
    mut neos: Vec<NearEarthObject>,
    mut approaches: Vec<CloseApproach>,
) -> DatabaseResult<LinkedCollections> {
    log_event_with_fields(
        Event::LinkBegin,
        &[
            ("neos", neos.len().to_string().as_str()),
            ("approaches", approaches.len().to_string().as_str()),
        ],
    );

    let designation_index = build_designation_index(&neos)?;
    let name_index = build_name_index(&neos);

    log_event_with_fields(
        Event::NameIndexBuilt,
        &[("names", name_index.len().to_string().as_str())],
    );

    for (position, approach) in approaches.iter_mut().enumerate() {
        let neo_id = match designation_index.get(&approach.designation) {
            Some(&id) => id,
            None => {
                log_event_with_fields(
                    Event::IntegrityViolation,
                    &[
                        ("designation", approach.designation.as_str()),
                        ("position", position.to_string().as_str()),
                    ],
                );
                return Err(DatabaseError::integrity_violation(
                    position,
                    &approach.designation,
                ));
            }
        };

        approach.neo = Some(neo_id);
        neos[neo_id.index()].approaches.push(ApproachId(position));
    }

    log_event_with_fields(
        Event::LinkComplete,
        &[
            ("approaches", approaches.len().to_string().as_str()),
            ("neos", neos.len().to_string().as_str()),
        ],
    );

    Ok(LinkedCollections {
        neos,
        approaches,
        designation_index,
        name_index,
    })
}

/// Builds designation -> handle, rejecting repeated designations
fn build_designation_index(neos: &[NearEarthObject]) -> DatabaseResult<HashMap<String, NeoId>> {
    let mut index = HashMap::with_capacity(neos.len());

    for (position, neo) in neos.iter().enumerate() {
        if index.insert(neo.designation.clone(), NeoId(position)).is_some() {
            return Err(DatabaseError::duplicate_designation(position, &neo.designation));
        }
    }

    Ok(index)
}

/// Builds name -> designation for every named NEO, last write wins
fn build_name_index(neos: &[NearEarthObject]) -> HashMap<String, String> {
    let mut index = HashMap::new();

    for neo in neos {
        let name = match neo.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        if let Some(previous) = index.insert(name.to_string(), neo.designation.clone()) {
            trace_event_with_fields(
                Event::NameIndexBuilt,
                &[
                    ("name", name),
                    ("replaced", previous.as_str()),
                    ("designation", neo.designation.as_str()),
                ],
            );
        }
    }

    index
}

/// Checks that links and indexes agree in both directions.
///
/// - Every approach points at an existing NEO with a matching designation.
/// - Every NEO lists only approaches that point back to it, each once.
/// - Together the NEO lists cover every approach.
/// - The name index maps exactly the named NEOs to their designations.
pub(crate) fn verify(linked: &LinkedCollections) -> DatabaseResult<()> {
    for (position, approach) in linked.approaches.iter().enumerate() {
        let neo_id = approach.neo.ok_or_else(|| {
            DatabaseError::link_inconsistent(format!("Close approach #{} is unlinked", position))
        })?;

        let neo = linked.neos.get(neo_id.index()).ok_or_else(|| {
            DatabaseError::link_inconsistent(format!(
                "Close approach #{} points at missing {}",
                position, neo_id
            ))
        })?;

        if neo.designation != approach.designation {
            return Err(DatabaseError::link_inconsistent(format!(
                "Close approach #{} for '{}' is linked to '{}'",
                position, approach.designation, neo.designation
            )));
        }
    }

    let mut listed = 0usize;
    for (position, neo) in linked.neos.iter().enumerate() {
        let mut previous: Option<ApproachId> = None;

        for &approach_id in &neo.approaches {
            if previous.map_or(false, |p| p >= approach_id) {
                return Err(DatabaseError::link_inconsistent(format!(
                    "NEO '{}' lists {} out of order or twice",
                    neo.designation, approach_id
                )));
            }
            previous = Some(approach_id);

            let back = linked
                .approaches
                .get(approach_id.index())
                .and_then(|a| a.neo);
            if back != Some(NeoId(position)) {
                return Err(DatabaseError::link_inconsistent(format!(
                    "NEO '{}' lists {} which does not point back to it",
                    neo.designation, approach_id
                )));
            }
        }

        listed += neo.approaches.len();
    }

    if listed != linked.approaches.len() {
        return Err(DatabaseError::link_inconsistent(format!(
            "NEOs list {} approaches but {} are stored",
            listed,
            linked.approaches.len()
        )));
    }

    for (name, designation) in &linked.name_index {
        let named = linked
            .designation_index
            .get(designation)
            .and_then(|id| linked.neos.get(id.index()))
            .and_then(|neo| neo.name.as_deref());
        if named != Some(name.as_str()) {
            return Err(DatabaseError::link_inconsistent(format!(
                "Name index maps '{}' to '{}' which does not carry that name",
                name, designation
            )));
        }
    }

    for neo in &linked.neos {
        if let Some(name) = neo.name.as_deref() {
            if !name.is_empty() && !linked.name_index.contains_key(name) {
                return Err(DatabaseError::link_inconsistent(format!(
                    "Named NEO '{}' is missing from the name index",
                    neo.designation
                )));
            }
        }
    }

    Ok(())
}
