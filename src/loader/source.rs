//! Row sources for subject tables
//!
//! A source yields the header and the data rows as trimmed text cells,
//! whatever the file format.

use std::path::Path;

use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::error::util::safe_open_file;
use crate::utils::io::parquet::{batch_to_string_rows, read_parquet};

/// Header and data rows of a source table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with the given delimiter
    Delimited(u8),
    Parquet,
}

impl SourceFormat {
    /// Choose the format from the file extension
    ///
    /// `.csv` and `.txt` use the configured delimiter, `.tsv` always uses tabs.
    /// Any other extension is rejected.
    pub fn detect(path: &Path, config: &StudyConfig) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") => Ok(Self::Parquet),
            Some("tsv") => Ok(Self::Delimited(b'\t')),
            Some("csv" | "txt") => Ok(Self::Delimited(config.delimiter_byte()?)),
            _ => Err(StudyError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a source table in the detected format
pub fn read_table(path: &Path, config: &StudyConfig) -> Result<RawTable> {
    match SourceFormat::detect(path, config)? {
        SourceFormat::Delimited(delimiter) => read_delimited(path, delimiter),
        SourceFormat::Parquet => read_parquet_table(path),
    }
}

/// Read delimited text; row lengths are checked by the loader
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let file = safe_open_file(path, "reading subject table")?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let header = reader.headers()?.iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(String::from).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(RawTable { header, rows })
}

/// Read a Parquet file with every column rendered as text
pub fn read_parquet_table(path: &Path) -> Result<RawTable> {
    let (header, batches) = read_parquet(path)?;
    let mut rows = Vec::new();
    for batch in &batches {
        rows.extend(batch_to_string_rows(batch)?);
    }
    Ok(RawTable { header, rows })
}
