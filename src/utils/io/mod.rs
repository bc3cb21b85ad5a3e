//! File input and output helpers

pub mod output;
pub mod parquet;

pub use output::{write_table, write_table_to_dir};
pub use parquet::read_parquet;
