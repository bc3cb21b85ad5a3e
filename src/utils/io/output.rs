//! Writing rendered tables to disk

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::algorithm::tabulation::Table;
use crate::error::Result;
use crate::error::util::{ensure_directory, safe_create_file};
use crate::utils::logging::log_operation_complete;

/// Write one table as delimited text, creating parent directories
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<()> {
    let file = safe_create_file(path)?;
    table.write_csv(BufWriter::new(file), delimiter)?;
    log_operation_complete("wrote", path, table.rows().len(), None);
    Ok(())
}

/// Write a table to `<dir>/<name>.csv` and return the path
pub fn write_table_to_dir(dir: &Path, name: &str, table: &Table, delimiter: u8) -> Result<PathBuf> {
    ensure_directory(dir)?;
    let path = dir.join(format!("{name}.csv"));
    write_table(&path, table, delimiter)?;
    Ok(path)
}
