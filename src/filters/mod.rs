//! Filter construction for neodb
//!
//! Turns user criteria into `AttributeFilter`s, which plug into
//! `NeoDatabase::query` through the `ApproachFilter` trait.

mod attribute;
mod criteria;

pub use attribute::{Attribute, AttributeFilter, FilterOp};
pub use criteria::{create_filters, limit, Criteria};
