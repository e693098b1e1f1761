//! The NEO database
//!
//! Owns the NEO arena, the approach arena, and the derived indexes.
//! Built once from unlinked collections and immutable afterwards: every
//! read API takes `&self`.

use std::collections::HashMap;
use std::fmt;

use crate::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::errors::DatabaseResult;
use super::linker::{self, LinkedCollections};
use super::query::{ApproachFilter, ApproachQuery};
use super::view::ApproachRef;

/// A linked database of near-Earth objects and their close approaches
#[derive(Debug)]
pub struct NeoDatabase {
    /// NEO arena in extraction order
    neos: Vec<NearEarthObject>,
    /// Approach arena in extraction order
    approaches: Vec<CloseApproach>,
    /// Designation -> NEO handle
    designation_index: HashMap<String, NeoId>,
    /// Name -> designation
    name_index: HashMap<String, String>,
}

impl NeoDatabase {
    /// Links the extracted collections and builds the lookup indexes.
    ///
    /// Construction:
    /// 1. Designation index (duplicate designation is FATAL)
    /// 2. Name index (last NEO with a given name wins)
    /// 3. Approach linking in storage order (unknown designation is FATAL)
    /// 4. Verification of both link directions
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> DatabaseResult<Self> {
        let linked = linker::link(neos, approaches)?;

        log_event(Event::VerifyBegin);
        linker::verify(&linked)?;
        log_event(Event::VerifyComplete);

        let LinkedCollections {
            neos,
            approaches,
            designation_index,
            name_index,
        } = linked;

        Ok(Self {
            neos,
            approaches,
            designation_index,
            name_index,
        })
    }

    /// Finds a NEO by exact primary designation
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.designation_index
            .get(designation)
            .map(|id| &self.neos[id.index()])
    }

    /// Finds a NEO by exact name.
    ///
    /// `None` and the empty string never match, whatever the dataset holds.
    pub fn get_neo_by_name<'n>(
        &self,
        name: impl Into<Option<&'n str>>,
    ) -> Option<&NearEarthObject> {
        let name = name.into().filter(|n| !n.is_empty())?;
        let designation = self.name_index.get(name)?;
        self.get_neo_by_designation(designation)
    }

    /// Streams the close approaches matching every filter, in storage order.
    ///
    /// An empty filter slice matches every approach.
    pub fn query<'a, F: ApproachFilter>(&'a self, filters: &'a [F]) -> ApproachQuery<'a, F> {
        let query = ApproachQuery::new(&self.neos, &self.approaches, filters);
        log_event_with_fields(
            Event::QueryBegin,
            &[("filters", query.filter_count().to_string().as_str())],
        );
        query
    }

    /// Returns the NEO behind a handle
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }

    /// Returns the linked view of an approach handle
    pub fn approach(&self, id: ApproachId) -> Option<ApproachRef<'_>> {
        let approach = self.approaches.get(id.index())?;
        let neo = self.neos.get(approach.neo?.index())?;
        Some(ApproachRef::new(id, approach, neo))
    }

    /// Returns the NEO an approach is linked to
    pub fn neo_of(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo.and_then(|id| self.neo(id))
    }

    /// Streams a NEO's approaches in storage order
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = ApproachRef<'a>> + 'a {
        neo.approaches.iter().filter_map(move |&id| self.approach(id))
    }

    /// All NEOs in extraction order
    pub fn neos(&self) -> impl Iterator<Item = &NearEarthObject> {
        self.neos.iter()
    }

    /// All approaches in storage order
    pub fn approaches(&self) -> impl Iterator<Item = ApproachRef<'_>> {
        (0..self.approaches.len()).filter_map(move |i| self.approach(ApproachId(i)))
    }

    /// Number of NEOs
    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Number of close approaches
    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Returns true if the database holds no NEOs
    pub fn is_empty(&self) -> bool {
        self.neos.is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            neos: self.neos.len(),
            named_neos: self.name_index.len(),
            hazardous_neos: self.neos.iter().filter(|n| n.hazardous).count(),
            neos_with_diameter: self.neos.iter().filter(|n| n.has_diameter()).count(),
            neos_with_approaches: self.neos.iter().filter(|n| !n.approaches.is_empty()).count(),
            approaches: self.approaches.len(),
        }
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DatabaseStats {
    pub neos: usize,
    /// Distinct names in the name index
    pub named_neos: usize,
    pub hazardous_neos: usize,
    pub neos_with_diameter: usize,
    pub neos_with_approaches: usize,
    pub approaches: usize,
}

impl fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NEOs: {} ({} named, {} hazardous, {} with diameter, {} with approaches), Close approaches: {}",
            self.neos,
            self.named_neos,
            self.hazardous_neos,
            self.neos_with_diameter,
            self.neos_with_approaches,
            self.approaches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::query::{predicate, DynFilter};
    use chrono::NaiveDate;

    fn sample() -> NeoDatabase {
        let time = |d: u32| {
            NaiveDate::from_ymd_opt(2020, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let neos = vec![
            NearEarthObject::new("433", Some("Eros".into()), 16.84, false),
            NearEarthObject::new("2020 AB", None, f64::NAN, true),
        ];
        let approaches = vec![
            CloseApproach::new("433", time(1), 0.15, 5.0),
            CloseApproach::new("2020 AB", time(2), 0.02, 12.0),
            CloseApproach::new("433", time(3), 0.30, 4.0),
        ];
        NeoDatabase::new(neos, approaches).unwrap()
    }

    #[test]
    fn test_lookup_by_designation_exact() {
        let db = sample();
        assert_eq!(db.get_neo_by_designation("433").unwrap().fullname(), "433 (Eros)");
        assert!(db.get_neo_by_designation("2020 ab").is_none());
        assert!(db.get_neo_by_designation(" 433").is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let db = sample();
        assert_eq!(db.get_neo_by_name("Eros").unwrap().designation, "433");
        assert!(db.get_neo_by_name("eros").is_none());
        assert!(db.get_neo_by_name("").is_none());
        assert!(db.get_neo_by_name(None).is_none());
    }

    #[test]
    fn test_approaches_of_neo() {
        let db = sample();
        let eros = db.get_neo_by_designation("433").unwrap();
        let distances: Vec<f64> = db.approaches_of(eros).map(|ca| ca.distance).collect();
        assert_eq!(distances, vec![0.15, 0.30]);
    }

    #[test]
    fn test_neo_of_approach() {
        let db = sample();
        let first = db.approach(ApproachId(1)).unwrap();
        let neo = db.neo_of(first.approach()).unwrap();
        assert!(std::ptr::eq(neo, first.neo()));
        assert_eq!(neo.designation, "2020 AB");
    }

    #[test]
    fn test_query_empty_filters_yields_all() {
        let db = sample();
        let query = db.query::<DynFilter>(&[]);
        assert_eq!(query.filter_count(), 0);
        assert_eq!(query.count(), 3);
    }

    #[test]
    fn test_query_filter_reaches_linked_neo() {
        let db = sample();
        let hazardous = [predicate(|ca: &ApproachRef<'_>| ca.neo().hazardous)];
        let matched: Vec<_> = db.query(&hazardous).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].designation, "2020 AB");
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.neos, 2);
        assert_eq!(stats.named_neos, 1);
        assert_eq!(stats.hazardous_neos, 1);
        assert_eq!(stats.neos_with_diameter, 1);
        assert_eq!(stats.neos_with_approaches, 2);
        assert_eq!(stats.approaches, 3);
    }

    #[test]
    fn test_database_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NeoDatabase>();
    }
}
