//! Utility modules for file I/O and logging

pub mod io;
pub mod logging;

pub use io::{read_parquet, write_table, write_table_to_dir};
