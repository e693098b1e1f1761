//! CLI module for neodb
//!
//! Provides command-line interface for:
//! - inspect: Look up one NEO by designation or name
//! - query: Stream close approaches matching criteria
//! - stats: Dataset counts

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, CriteriaArgs};
pub use commands::{inspect, load_database, query, run, run_command, stats, Config, InspectTarget};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_line};
