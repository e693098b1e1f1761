//! Database subsystem for neodb
//!
//! Links NEOs with their close approaches and answers exact lookups and
//! filtered queries.
//!
//! # Ownership
//!
//! - `NeoDatabase` owns every NEO and every approach
//! - An approach refers to its NEO by `NeoId`
//! - A NEO lists its approaches by `ApproachId`
//!
//! # Invariants
//!
//! - Every approach resolves to a stored NEO whose list contains it once
//! - Every NEO lists only approaches that resolve back to it
//! - The name index covers exactly the named NEOs
//! - Designations are unique
//!
//! Violations found while linking are FATAL and abort construction.

mod database;
mod errors;
mod linker;
mod query;
mod view;

pub use database::{DatabaseStats, NeoDatabase};
pub use errors::{DatabaseError, DatabaseErrorCode, DatabaseResult, Severity};
pub use query::{predicate, ApproachFilter, ApproachQuery, DynFilter, FnFilter};
pub use view::ApproachRef;
