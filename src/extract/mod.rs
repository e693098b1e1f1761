//! Record extraction for neodb
//!
//! Reads the NEO CSV and the close approach JSON into plain, unlinked
//! record collections. Linking happens later in `NeoDatabase::new`.

mod approaches;
mod errors;
mod neos;

pub use approaches::{load_approaches, parse_approaches, CAD_TIME_FORMAT};
pub use errors::{ExtractError, ExtractResult};
pub use neos::{load_neos, parse_neos};
