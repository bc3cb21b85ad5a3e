//! Command line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "study-tab",
    version,
    about = "Case-control matching and tabulation for clinical study tables"
)]
pub struct Cli {
    /// JSON study configuration (group labels, column headers, number format)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subject table (.csv, .tsv, .txt or .parquet)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pair every control with the nearest-aged case of the same sex, per case group
    Match(MatchArgs),

    /// Pair subjects by best similarity score in a single greedy pass
    ScoredMatch(ScoredMatchArgs),

    /// Render the standard tables into a directory
    Tabulate(TabulateArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Only match this case group
    #[arg(long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Write the matched subjects to this file instead of printing them
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ScoredMatchArgs {
    /// Largest age difference in years a pair may have
    #[arg(long, value_name = "YEARS")]
    pub max_age_gap: Option<f64>,
}

#[derive(Parser)]
pub struct TabulateArgs {
    /// Directory receiving one CSV file per table
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Tabulate the matched subjects, controls relabeled into their case group
    #[arg(long)]
    pub matched: bool,
}
