//! Error handling for study tabulation.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for loading, matching and tabulating study subjects
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    /// Error opening, reading or writing a file
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error reading or writing delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error processing Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error parsing a JSON configuration file
    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is internally inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The input file type cannot be read
    #[error("Unsupported input format for {}: expected .csv, .tsv, .txt or .parquet", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A required column is missing from the input header
    #[error("Required column '{column}' ({field}) not found in input")]
    MissingColumn { column: String, field: String },

    /// A data row has more cells than the header
    #[error("Row {row}: {found} fields but the header has {expected}")]
    ExtraFields {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A categorical cell holds a value outside its closed enumeration
    #[error("Row {row}: unknown {field} value '{value}'")]
    InvalidCategory {
        field: String,
        value: String,
        row: usize,
    },

    /// A numeric cell could not be parsed
    #[error("Row {row}: cannot parse {field} value '{value}' as a number")]
    InvalidNumber {
        field: String,
        value: String,
        row: usize,
    },

    /// A subject's category is not one of the buckets of a grouped-values table
    #[error("{value} did not match: {}", .valid.join(","))]
    GroupMismatch { value: String, valid: Vec<String> },

    /// A subject's row category is not one of the rows of a contingency table
    #[error("row category '{value}' is not one of: {}", .valid.join(","))]
    UnmappedCategory { value: String, valid: Vec<String> },
}

impl StudyError {
    /// Wrap an I/O error together with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error stems from bad input data rather than the environment
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. }
                | Self::ExtraFields { .. }
                | Self::InvalidCategory { .. }
                | Self::InvalidNumber { .. }
                | Self::GroupMismatch { .. }
                | Self::UnmappedCategory { .. }
        )
    }
}

/// Result type for study operations
pub type Result<T> = std::result::Result<T, StudyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_mismatch_lists_valid_groups() {
        let err = StudyError::GroupMismatch {
            value: "X".to_string(),
            valid: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), "X did not match: A,B");
        assert!(err.is_data_error());
    }

    #[test]
    fn io_errors_are_not_data_errors() {
        let err = StudyError::io("missing.csv", io::Error::from(io::ErrorKind::NotFound));
        assert!(!err.is_data_error());
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn extra_fields_name_the_row() {
        let err = StudyError::ExtraFields {
            row: 1,
            expected: 4,
            found: 5,
        };
        assert_eq!(err.to_string(), "Row 1: 5 fields but the header has 4");
        assert!(err.is_data_error());
    }
}
