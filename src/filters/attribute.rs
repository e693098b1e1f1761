//! Attribute comparison filters
//!
//! Compares one attribute of a linked close approach against a bound.
//! No coercion: a date filter only ever compares dates.
//! An unknown (`NaN`) diameter never matches any comparison.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::database::{ApproachFilter, ApproachRef};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// attribute = value
    Eq,
    /// attribute >= value
    Gte,
    /// attribute <= value
    Lte,
}

impl FilterOp {
    /// Returns the operator symbol for display
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
        }
    }

    /// Applies the operator; incomparable values never match
    fn holds<T: PartialOrd>(&self, actual: &T, bound: &T) -> bool {
        match (self, actual.partial_cmp(bound)) {
            (_, None) => false,
            (FilterOp::Eq, Some(ord)) => ord == Ordering::Equal,
            (FilterOp::Gte, Some(ord)) => ord != Ordering::Less,
            (FilterOp::Lte, Some(ord)) => ord != Ordering::Greater,
        }
    }
}

/// Attributes a filter can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Calendar date of the approach
    Date,
    /// Approach distance (au)
    Distance,
    /// Relative velocity (km/s)
    Velocity,
    /// Diameter of the approaching NEO (km)
    Diameter,
    /// Hazard flag of the approaching NEO
    Hazardous,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Date => "date",
            Attribute::Distance => "distance",
            Attribute::Velocity => "velocity",
            Attribute::Diameter => "diameter",
            Attribute::Hazardous => "hazardous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Date(NaiveDate),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Date(d) => write!(f, "{}", d),
            Bound::Number(n) => write!(f, "{}", n),
            Bound::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// A single `attribute op value` comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeFilter {
    attribute: Attribute,
    op: FilterOp,
    bound: Bound,
}

impl AttributeFilter {
    /// Compare the approach date
    pub fn date(op: FilterOp, date: NaiveDate) -> Self {
        Self {
            attribute: Attribute::Date,
            op,
            bound: Bound::Date(date),
        }
    }

    /// Compare the approach distance
    pub fn distance(op: FilterOp, au: f64) -> Self {
        Self {
            attribute: Attribute::Distance,
            op,
            bound: Bound::Number(au),
        }
    }

    /// Compare the relative velocity
    pub fn velocity(op: FilterOp, km_s: f64) -> Self {
        Self {
            attribute: Attribute::Velocity,
            op,
            bound: Bound::Number(km_s),
        }
    }

    /// Compare the NEO diameter
    pub fn diameter(op: FilterOp, km: f64) -> Self {
        Self {
            attribute: Attribute::Diameter,
            op,
            bound: Bound::Number(km),
        }
    }

    /// Match the NEO hazard flag
    pub fn hazardous(hazardous: bool) -> Self {
        Self {
            attribute: Attribute::Hazardous,
            op: FilterOp::Eq,
            bound: Bound::Flag(hazardous),
        }
    }

    /// The attribute this filter reads
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// The comparison operator
    pub fn op(&self) -> FilterOp {
        self.op
    }
}

impl ApproachFilter for AttributeFilter {
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        match (self.attribute, self.bound) {
            (Attribute::Date, Bound::Date(bound)) => {
                self.op.holds(&approach.time.date(), &bound)
            }
            (Attribute::Distance, Bound::Number(bound)) => {
                self.op.holds(&approach.distance, &bound)
            }
            (Attribute::Velocity, Bound::Number(bound)) => {
                self.op.holds(&approach.velocity, &bound)
            }
            (Attribute::Diameter, Bound::Number(bound)) => {
                self.op.holds(&approach.neo().diameter, &bound)
            }
            (Attribute::Hazardous, Bound::Flag(bound)) => {
                self.op.holds(&approach.neo().hazardous, &bound)
            }
            // Constructors never pair an attribute with a foreign bound
            _ => false,
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.attribute.as_str(),
            self.op.symbol(),
            self.bound
        )
    }
}
