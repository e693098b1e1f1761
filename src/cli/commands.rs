//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Configuration load (file, then flag overrides)
//! 2. Logging set-up
//! 3. Extraction of both source files
//! 4. Linking into a `NeoDatabase` (FATAL on integrity faults)
//! 5. Command execution against the read-only database

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::database::NeoDatabase;
use crate::extract::{load_approaches, load_neos};
use crate::filters::{create_filters, limit, Criteria};
use crate::observability::{init_logging, log_event_with_fields, Event, LOG_LEVELS};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_line};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// NEO CSV file (optional, default "data/neos.csv")
    #[serde(default = "default_neo_path")]
    pub neo_path: PathBuf,

    /// Close approach JSON file (optional, default "data/cad.json")
    #[serde(default = "default_cad_path")]
    pub cad_path: PathBuf,

    /// Log level (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_neo_path() -> PathBuf {
    PathBuf::from("data/neos.csv")
}
fn default_cad_path() -> PathBuf {
    PathBuf::from("data/cad.json")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neo_path: default_neo_path(),
            cad_path: default_cad_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve configuration: file (or defaults), then flag overrides
    pub fn resolve(
        path: Option<&Path>,
        neofile: Option<PathBuf>,
        cadfile: Option<PathBuf>,
    ) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(neofile) = neofile {
            config.neo_path = neofile;
        }
        if let Some(cadfile) = cadfile {
            config.cad_path = cadfile;
        }

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of {}.",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// What `inspect` looks up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectTarget {
    Designation(String),
    Name(String),
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = Config::resolve(cli.config.as_deref(), cli.neofile, cli.cadfile)?;
    init_logging(&config.log_level);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("cad_path", config.cad_path.display().to_string().as_str()),
            ("neo_path", config.neo_path.display().to_string().as_str()),
        ],
    );

    let db = load_database(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&db, cli.command, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Extract both source files and link them
pub fn load_database(config: &Config) -> CliResult<NeoDatabase> {
    let neos = load_neos(&config.neo_path)?;
    let approaches = load_approaches(&config.cad_path)?;
    Ok(NeoDatabase::new(neos, approaches)?)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(db: &NeoDatabase, cmd: Command, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Inspect { pdes, name, verbose } => {
            let target = match (pdes, name) {
                (Some(pdes), _) => InspectTarget::Designation(pdes),
                (None, Some(name)) => InspectTarget::Name(name),
                (None, None) => {
                    return Err(CliError::config_error("inspect needs --pdes or --name"))
                }
            };
            inspect(db, &target, verbose, out)
        }
        Command::Query { criteria, limit, json } => {
            query(db, &criteria.to_criteria(), limit, json, out)
        }
        Command::Stats { json } => stats(db, json, out),
    }
}

/// Print one NEO, optionally with its close approaches
pub fn inspect<W: Write>(
    db: &NeoDatabase,
    target: &InspectTarget,
    verbose: bool,
    out: &mut W,
) -> CliResult<()> {
    let neo = match target {
        InspectTarget::Designation(pdes) => db.get_neo_by_designation(pdes),
        InspectTarget::Name(name) => db.get_neo_by_name(name.as_str()),
    };

    let neo = match neo {
        Some(neo) => neo,
        None => return write_line(out, "No matching NEOs exist in the database."),
    };

    write_line(out, neo)?;
    if verbose {
        for approach in db.approaches_of(neo) {
            write_line(out, format_args!("- {}", approach))?;
        }
    }

    Ok(())
}

/// Stream matching close approaches, stopping at the limit
pub fn query<W: Write>(
    db: &NeoDatabase,
    criteria: &Criteria,
    max_results: Option<usize>,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    let filters = create_filters(criteria);
    let mut results = db.query(&filters);

    let mut matched = 0usize;
    for approach in limit(results.by_ref(), max_results) {
        matched += 1;
        if json {
            write_json(out, &approach)?;
        } else {
            write_line(out, approach)?;
        }
    }

    log_event_with_fields(
        Event::QueryComplete,
        &[
            ("matched", matched.to_string().as_str()),
            ("scanned", results.scanned().to_string().as_str()),
        ],
    );

    if matched == 0 && !json {
        write_line(out, "No matching close approaches.")?;
    }

    Ok(())
}

/// Print dataset statistics
pub fn stats<W: Write>(db: &NeoDatabase, json: bool, out: &mut W) -> CliResult<()> {
    let stats = db.stats();
    if json {
        write_json(out, &stats)
    } else {
        write_line(out, stats)
    }
}
