//! Long-to-wide listing of values per category
//!
//! Each category becomes a column. Row `i` holds the `i`-th value of every
//! category in item order, blank where a category has fewer values.

use itertools::Itertools;

use crate::algorithm::tabulation::table::Table;
use crate::error::{Result, StudyError};

/// Bucket rendered values by category and lay them out column-wise
///
/// `category` names the bucket of an item and must equal one of
/// `categories`; otherwise the table fails with
/// [`StudyError::GroupMismatch`]. Items whose `value` is `None` are skipped.
pub fn grouped_values_table<T, FC, FV>(
    categories: &[String],
    items: &[T],
    category: FC,
    value: FV,
) -> Result<Table>
where
    FC: Fn(&T) -> String,
    FV: Fn(&T) -> Option<String>,
{
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); categories.len()];

    for item in items {
        let label = category(item);
        let Some(bucket) = categories.iter().position(|c| *c == label) else {
            return Err(StudyError::GroupMismatch {
                value: label,
                valid: categories.to_vec(),
            });
        };
        if let Some(rendered) = value(item) {
            buckets[bucket].push(rendered);
        }
    }

    let mut table = Table::new(categories.iter().map(String::as_str));
    let depth = buckets.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..depth {
        let row = buckets
            .iter()
            .map(|bucket| bucket.get(i).cloned().unwrap_or_default())
            .collect_vec();
        table.push_row(row);
    }
    Ok(table)
}
