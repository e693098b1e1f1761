//! Query Semantics Tests
//!
//! Tests for filtered queries:
//! - No filters yields every approach once, in storage order
//! - Conjunction with short-circuit evaluation
//! - Lazy, incremental production
//! - Independent restarts

use std::cell::Cell;

use chrono::{NaiveDate, NaiveDateTime};
use neodb::database::{predicate, ApproachFilter, ApproachRef, DynFilter, NeoDatabase};
use neodb::filters::{create_filters, limit, AttributeFilter, Criteria, FilterOp};
use neodb::model::{CloseApproach, NearEarthObject};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Approaches deliberately stored out of time order.
fn make_db() -> NeoDatabase {
    let neos = vec![
        NearEarthObject::new("433", Some("Eros".into()), 16.84, false),
        NearEarthObject::new("99942", Some("Apophis".into()), 0.37, true),
        NearEarthObject::new("2019 AB", None, f64::NAN, true),
    ];
    let approaches = vec![
        CloseApproach::new("433", at(2020, 1, 5), 0.15, 5.0),
        CloseApproach::new("99942", at(2029, 4, 13), 0.0003, 7.4),
        CloseApproach::new("2019 AB", at(2019, 1, 2), 0.02, 12.0),
        CloseApproach::new("433", at(2056, 1, 24), 0.15, 5.8),
        CloseApproach::new("99942", at(2036, 3, 27), 0.3, 6.2),
        CloseApproach::new("2019 AB", at(2020, 1, 5), 0.4, 15.1),
    ];
    NeoDatabase::new(neos, approaches).unwrap()
}

fn distances<'a>(results: impl Iterator<Item = ApproachRef<'a>>) -> Vec<f64> {
    results.map(|ca| ca.distance).collect()
}

// =============================================================================
// Baseline Tests
// =============================================================================

/// No filters yields every approach once, in storage order.
#[test]
fn test_no_filters_yields_all_in_order() {
    let db = make_db();
    let all: Vec<_> = db.query::<DynFilter>(&[]).collect();

    assert_eq!(all.len(), db.approach_count());
    for (position, approach) in all.iter().enumerate() {
        assert_eq!(approach.id().index(), position);
    }
    assert_eq!(distances(all.into_iter()), vec![0.15, 0.0003, 0.02, 0.15, 0.3, 0.4]);
}

/// An always-false filter yields nothing.
#[test]
fn test_always_false_yields_nothing() {
    let db = make_db();
    let never = [predicate(|_: &ApproachRef<'_>| false)];
    assert_eq!(db.query(&never).count(), 0);
}

/// An always-true filter yields the same as no filters.
#[test]
fn test_always_true_matches_unfiltered() {
    let db = make_db();
    let always = [predicate(|_: &ApproachRef<'_>| true)];

    let filtered: Vec<_> = db.query(&always).collect();
    let unfiltered: Vec<_> = db.query::<DynFilter>(&[]).collect();
    assert_eq!(filtered, unfiltered);
}

/// Filters combine as a conjunction.
#[test]
fn test_conjunction() {
    let db = make_db();
    let filters: Vec<DynFilter> = vec![
        Box::new(predicate(|ca: &ApproachRef<'_>| ca.neo().hazardous)),
        Box::new(AttributeFilter::velocity(FilterOp::Gte, 7.0)),
    ];

    let query = db.query(&filters);
    assert_eq!(query.filter_count(), 2);

    let matched: Vec<_> = query
        .map(|ca| (ca.designation.clone(), ca.velocity))
        .collect();
    assert_eq!(
        matched,
        vec![
            ("99942".to_string(), 7.4),
            ("2019 AB".to_string(), 12.0),
            ("2019 AB".to_string(), 15.1),
        ]
    );
}

// =============================================================================
// Evaluation Order Tests
// =============================================================================

/// The second filter never runs for approaches the first rejects.
#[test]
fn test_short_circuit() {
    let db = make_db();
    let second_calls = Cell::new(0usize);

    let first = predicate(|ca: &ApproachRef<'_>| ca.designation == "433");
    let second = predicate(|ca: &ApproachRef<'_>| {
        assert_eq!(ca.designation, "433", "second filter saw a rejected approach");
        second_calls.set(second_calls.get() + 1);
        true
    });
    let filters: [&dyn ApproachFilter; 2] = [&first, &second];

    assert_eq!(db.query(&filters).count(), 2);
    assert_eq!(second_calls.get(), 2);
}

/// Filters run in caller order.
#[test]
fn test_filters_run_in_order() {
    let db = make_db();
    let log = std::cell::RefCell::new(Vec::new());

    let a = predicate(|_: &ApproachRef<'_>| {
        log.borrow_mut().push('a');
        true
    });
    let b = predicate(|_: &ApproachRef<'_>| {
        log.borrow_mut().push('b');
        true
    });
    let filters: [&dyn ApproachFilter; 2] = [&a, &b];

    let _ = db.query(&filters).next();
    assert_eq!(*log.borrow(), vec!['a', 'b']);
}

// =============================================================================
// Laziness Tests
// =============================================================================

/// Taking the first match examines no more than needed.
#[test]
fn test_query_is_lazy() {
    let db = make_db();
    let calls = Cell::new(0usize);
    let counting = [predicate(|_: &ApproachRef<'_>| {
        calls.set(calls.get() + 1);
        true
    })];

    let mut query = db.query(&counting);
    assert!(query.next().is_some());
    assert_eq!(calls.get(), 1);
    assert_eq!(query.scanned(), 1);

    let rest = query.by_ref().take(2).count();
    assert_eq!(rest, 2);
    assert_eq!(calls.get(), 3);
}

/// `limit` stops pulling from the query at the cap.
#[test]
fn test_limit_stops_scanning() {
    let db = make_db();
    let hazardous = [AttributeFilter::hazardous(true)];

    let mut query = db.query(&hazardous);
    let taken: Vec<_> = limit(query.by_ref(), Some(1)).collect();
    assert_eq!(taken.len(), 1);
    // 433 at position 0 is rejected, 99942 at position 1 matches
    assert_eq!(query.scanned(), 2);
}

/// Each call starts a fresh traversal.
#[test]
fn test_query_restarts() {
    let db = make_db();
    let filters = [AttributeFilter::distance(FilterOp::Lte, 0.15)];

    let first: Vec<_> = db.query(&filters).collect();
    let second: Vec<_> = db.query(&filters).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

/// Exhausted queries stay exhausted.
#[test]
fn test_query_fused() {
    let db = make_db();
    let mut query = db.query::<DynFilter>(&[]);
    assert_eq!(query.by_ref().count(), 6);
    assert!(query.next().is_none());
    assert!(query.next().is_none());
}

// =============================================================================
// Attribute Filter Tests
// =============================================================================

/// Date equality compares calendar dates.
#[test]
fn test_date_filter() {
    let db = make_db();
    let criteria = Criteria {
        date: NaiveDate::from_ymd_opt(2020, 1, 5),
        ..Default::default()
    };
    let filters = create_filters(&criteria);

    let matched: Vec<_> = db.query(&filters).map(|ca| ca.designation.clone()).collect();
    assert_eq!(matched, vec!["433", "2019 AB"]);
}

/// Date range is inclusive on both ends.
#[test]
fn test_date_range() {
    let db = make_db();
    let criteria = Criteria {
        start_date: NaiveDate::from_ymd_opt(2020, 1, 5),
        end_date: NaiveDate::from_ymd_opt(2036, 3, 27),
        ..Default::default()
    };
    let filters = create_filters(&criteria);
    assert_eq!(db.query(&filters).count(), 4);
}

/// Unknown diameters never satisfy a diameter bound.
#[test]
fn test_diameter_nan_never_matches() {
    let db = make_db();
    let criteria = Criteria {
        diameter_max: Some(1000.0),
        ..Default::default()
    };
    let filters = create_filters(&criteria);

    assert!(db.query(&filters).all(|ca| ca.neo().designation != "2019 AB"));
    assert_eq!(db.query(&filters).count(), 4);
}

/// Hazard flag filters read the linked NEO.
#[test]
fn test_not_hazardous() {
    let db = make_db();
    let criteria = Criteria {
        hazardous: Some(false),
        ..Default::default()
    };
    let filters = create_filters(&criteria);

    let matched: Vec<_> = db.query(&filters).map(|ca| ca.neo().fullname()).collect();
    assert_eq!(matched, vec!["433 (Eros)", "433 (Eros)"]);
}

// =============================================================================
// Failure Propagation Tests
// =============================================================================

/// A panicking filter surfaces to the caller.
#[test]
#[should_panic(expected = "filter failed")]
fn test_panicking_filter_propagates() {
    let db = make_db();
    let broken = [predicate(|_: &ApproachRef<'_>| -> bool { panic!("filter failed") })];
    let _ = db.query(&broken).count();
}
