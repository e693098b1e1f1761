//! CLI argument definitions using clap
//!
//! Commands:
//! - neodb inspect (--pdes <designation> | --name <name>) [--verbose]
//! - neodb query [criteria] [--limit <n>] [--json]
//! - neodb stats [--json]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::filters::Criteria;

/// neodb - Explore near-Earth objects and their close approaches
#[derive(Parser, Debug)]
#[command(name = "neodb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the NEO CSV file (overrides config)
    #[arg(long, global = true)]
    pub neofile: Option<PathBuf>,

    /// Path to the close approach JSON file (overrides config)
    #[arg(long, global = true)]
    pub cadfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single NEO by designation or name
    Inspect {
        /// Primary designation, matched exactly
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        pdes: Option<String>,

        /// IAU name, matched exactly
        #[arg(long)]
        name: Option<String>,

        /// Also list the NEO's close approaches
        #[arg(short, long)]
        verbose: bool,
    },

    /// Stream close approaches matching every criterion
    Query {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Maximum number of results (0 means unlimited)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Print dataset statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Query criteria flags
#[derive(Args, Debug, Default)]
pub struct CriteriaArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance (au)
    #[arg(long = "min-distance")]
    pub distance_min: Option<f64>,

    /// Maximum approach distance (au)
    #[arg(long = "max-distance")]
    pub distance_max: Option<f64>,

    /// Minimum relative velocity (km/s)
    #[arg(long = "min-velocity")]
    pub velocity_min: Option<f64>,

    /// Maximum relative velocity (km/s)
    #[arg(long = "max-velocity")]
    pub velocity_max: Option<f64>,

    /// Minimum NEO diameter (km)
    #[arg(long = "min-diameter")]
    pub diameter_min: Option<f64>,

    /// Maximum NEO diameter (km)
    #[arg(long = "max-diameter")]
    pub diameter_max: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,
}

impl CriteriaArgs {
    /// Converts flags into query criteria
    pub fn to_criteria(&self) -> Criteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };

        Criteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.distance_min,
            distance_max: self.distance_max,
            velocity_min: self.velocity_min,
            velocity_max: self.velocity_max,
            diameter_min: self.diameter_min,
            diameter_max: self.diameter_max,
            hazardous,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect_by_name() {
        let cli = Cli::try_parse_from(["neodb", "inspect", "--name", "Eros", "-v"]).unwrap();
        match cli.command {
            Command::Inspect { pdes, name, verbose } => {
                assert_eq!(pdes, None);
                assert_eq!(name.as_deref(), Some("Eros"));
                assert!(verbose);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_inspect_requires_target() {
        assert!(Cli::try_parse_from(["neodb", "inspect"]).is_err());
        let both = ["neodb", "inspect", "--pdes", "433", "--name", "Eros"];
        assert!(Cli::try_parse_from(both).is_err());
    }

    #[test]
    fn test_parse_query_criteria() {
        let cli = Cli::try_parse_from([
            "neodb",
            "--neofile",
            "neos.csv",
            "query",
            "--start-date",
            "2020-01-01",
            "--max-distance",
            "0.1",
            "--hazardous",
            "--limit",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.neofile, Some(PathBuf::from("neos.csv")));
        match cli.command {
            Command::Query { criteria, limit, json } => {
                let criteria = criteria.to_criteria();
                assert_eq!(criteria.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
                assert_eq!(criteria.distance_max, Some(0.1));
                assert_eq!(criteria.hazardous, Some(true));
                assert_eq!(limit, Some(5));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_hazard_flags_conflict() {
        let result = Cli::try_parse_from(["neodb", "query", "--hazardous", "--not-hazardous"]);
        assert!(result.is_err());
    }
}
