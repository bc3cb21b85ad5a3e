//! Parquet reading
//!
//! Subject tables are small enough to read whole; every column is cast to
//! UTF-8 so the loader sees the same text cells as from delimited input.

use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Column names and record batches of a Parquet file
///
/// The names come from the file schema, so a file without rows still has them.
pub fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<RecordBatch>)> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = safe_open_file(path, "reading parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns = column_names(builder.schema());
    let batches = builder
        .build()?
        .collect::<std::result::Result<Vec<_>, ArrowError>>()?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok((columns, batches))
}

/// Field names of a schema, in order
#[must_use]
pub fn column_names(schema: &Schema) -> Vec<String> {
    schema.fields().iter().map(|f| f.name().clone()).collect()
}

/// Cast every column to strings; nulls become empty cells
pub fn batch_to_string_rows(batch: &RecordBatch) -> Result<Vec<Vec<String>>> {
    let columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|column| cast(column, &DataType::Utf8))
        .collect::<std::result::Result<_, ArrowError>>()?;

    let strings: Vec<&StringArray> = columns
        .iter()
        .map(|column| {
            column.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
                ArrowError::CastError(format!(
                    "column of type {} did not cast to strings",
                    column.data_type()
                ))
            })
        })
        .collect::<std::result::Result<_, ArrowError>>()?;

    let rows = (0..batch.num_rows())
        .map(|row| {
            strings
                .iter()
                .map(|array| {
                    if array.is_null(row) {
                        String::new()
                    } else {
                        array.value(row).to_string()
                    }
                })
                .collect()
        })
        .collect();
    Ok(rows)
}

