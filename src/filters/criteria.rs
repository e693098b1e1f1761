//! Builds filters from user-supplied criteria

use chrono::NaiveDate;

use super::attribute::{AttributeFilter, FilterOp};

/// User-supplied query criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    /// Approaches on exactly this date
    pub date: Option<NaiveDate>,
    /// Approaches on or after this date
    pub start_date: Option<NaiveDate>,
    /// Approaches on or before this date
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

impl Criteria {
    /// Returns true if no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Criteria::default()
    }
}

/// Creates one filter per set criterion.
///
/// Order is fixed: dates, distance, velocity, diameter, hazard.
pub fn create_filters(criteria: &Criteria) -> Vec<AttributeFilter> {
    let mut filters = Vec::new();

    if let Some(date) = criteria.date {
        filters.push(AttributeFilter::date(FilterOp::Eq, date));
    }
    if let Some(date) = criteria.start_date {
        filters.push(AttributeFilter::date(FilterOp::Gte, date));
    }
    if let Some(date) = criteria.end_date {
        filters.push(AttributeFilter::date(FilterOp::Lte, date));
    }
    if let Some(au) = criteria.distance_min {
        filters.push(AttributeFilter::distance(FilterOp::Gte, au));
    }
    if let Some(au) = criteria.distance_max {
        filters.push(AttributeFilter::distance(FilterOp::Lte, au));
    }
    if let Some(km_s) = criteria.velocity_min {
        filters.push(AttributeFilter::velocity(FilterOp::Gte, km_s));
    }
    if let Some(km_s) = criteria.velocity_max {
        filters.push(AttributeFilter::velocity(FilterOp::Lte, km_s));
    }
    if let Some(km) = criteria.diameter_min {
        filters.push(AttributeFilter::diameter(FilterOp::Gte, km));
    }
    if let Some(km) = criteria.diameter_max {
        filters.push(AttributeFilter::diameter(FilterOp::Lte, km));
    }
    if let Some(hazardous) = criteria.hazardous {
        filters.push(AttributeFilter::hazardous(hazardous));
    }

    filters
}

/// Caps a stream at `n` items; `None` and `Some(0)` mean unlimited.
///
/// Stays lazy: items past the cap are never pulled from `iter`.
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    match n {
        Some(n) if n > 0 => iter.take(n),
        _ => iter.take(usize::MAX),
    }
}
