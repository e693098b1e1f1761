//! neodb - A strict, deterministic database of near-Earth objects
//!
//! Loads NEOs and their close approaches, links them into one consistent
//! dataset, and answers exact lookups and lazy filtered queries.
//!
//! ```ignore
//! use neodb::database::{predicate, NeoDatabase};
//! use neodb::extract::{load_approaches, load_neos};
//!
//! let db = NeoDatabase::new(load_neos("neos.csv")?, load_approaches("cad.json")?)?;
//! let eros = db.get_neo_by_name("Eros");
//! let close = [predicate(|ca| ca.distance < 0.05)];
//! for approach in db.query(&close).take(10) {
//!     println!("{}", approach);
//! }
//! ```

pub mod cli;
pub mod database;
pub mod extract;
pub mod filters;
pub mod model;
pub mod observability;
