//! Case-control matching and tabulation for clinical study tables.
//!
//! Subjects are loaded from delimited text or Parquet files, controls are
//! paired with cases, and the (optionally matched) subject set is tabulated
//! into contingency tables and grouped value listings.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod utils;

// Core types
pub use config::StudyConfig;
pub use error::{Result, StudyError};
pub use models::{Flag, NaRelInt, NaStatus, RelInt, RelKind, Sex, Subject};

// Matching
pub use algorithm::matching::{
    InvariantViolation, MatchingConfig, PartitionedMatch, PartitionedMatcher, ScoredMatch,
    ScoredMatcher,
};
pub use algorithm::statistics::{Histogram, HistogramSummary};

// Tabulation
pub use algorithm::tabulation::{
    Category, ContingencyTable, Measure, Table, TableSpec, contingency_table, default_specs,
    grouped_values_table, render_all,
};

// Loading
pub use loader::{load_subjects, subjects_to_table};
