//! Filtered, lazy query over close approaches
//!
//! A query is a conjunction of caller-supplied `ApproachFilter`s.
//!
//! # Evaluation Order
//!
//! - Approaches are visited in storage order
//! - Filters run in slice order and stop at the first `false`
//! - Nothing is buffered: each `next()` scans only until the next match
//!
//! Filters only ever see shared references, so a query cannot mutate the
//! database. A panicking filter unwinds to the caller of `next()`.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::model::{ApproachId, CloseApproach, NearEarthObject};

use super::view::ApproachRef;

/// A predicate over linked close approaches
pub trait ApproachFilter {
    /// Returns true if the approach satisfies this filter
    fn matches(&self, approach: &ApproachRef<'_>) -> bool;
}

impl<T: ApproachFilter + ?Sized> ApproachFilter for &T {
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        (**self).matches(approach)
    }
}

impl<T: ApproachFilter + ?Sized> ApproachFilter for Box<T> {
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        (**self).matches(approach)
    }
}

/// Adapts a closure into an `ApproachFilter`
#[derive(Clone, Copy)]
pub struct FnFilter<F>(F);

impl<F> ApproachFilter for FnFilter<F>
where
    F: Fn(&ApproachRef<'_>) -> bool,
{
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        (self.0)(approach)
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFilter")
    }
}

/// Wraps a closure as a filter.
///
/// ```ignore
/// let far = predicate(|ca: &ApproachRef<'_>| ca.distance > 0.4);
/// ```
pub fn predicate<F>(f: F) -> FnFilter<F>
where
    F: Fn(&ApproachRef<'_>) -> bool,
{
    FnFilter(f)
}

/// Lazy iterator over the approaches matching every filter.
///
/// Created by `NeoDatabase::query`. Each call starts an independent
/// traversal from the first stored approach.
pub struct ApproachQuery<'a, F> {
    neos: &'a [NearEarthObject],
    cursor: std::iter::Enumerate<slice::Iter<'a, CloseApproach>>,
    filters: &'a [F],
    scanned: usize,
}

impl<'a, F: ApproachFilter> ApproachQuery<'a, F> {
    pub(crate) fn new(
        neos: &'a [NearEarthObject],
        approaches: &'a [CloseApproach],
        filters: &'a [F],
    ) -> Self {
        Self {
            neos,
            cursor: approaches.iter().enumerate(),
            filters,
            scanned: 0,
        }
    }

    /// Number of approaches examined so far
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Number of filters in the conjunction
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }
}

impl<'a, F: ApproachFilter> Iterator for ApproachQuery<'a, F> {
    type Item = ApproachRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let neos = self.neos;
        for (position, approach) in self.cursor.by_ref() {
            self.scanned += 1;

            let neo = match approach.neo {
                Some(id) => &neos[id.index()],
                None => unreachable!("approach #{} stored without a linked NEO", position),
            };
            let candidate = ApproachRef::new(ApproachId(position), approach, neo);

            // `all` stops at the first failing filter
            if self.filters.iter().all(|filter| filter.matches(&candidate)) {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}

impl<F: ApproachFilter> FusedIterator for ApproachQuery<'_, F> {}

/// Boxed filter for heterogeneous filter lists
pub type DynFilter = Box<dyn ApproachFilter>;
