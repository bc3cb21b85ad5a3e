//! Cross-tabulation of two categorical projections

use log::debug;
use rustc_hash::FxHashMap;

use crate::algorithm::tabulation::table::Table;
use crate::error::{Result, StudyError};

/// Default content of the top-left header cell
pub const DEFAULT_TITLE: &str = "Title";

/// Count grid over caller-ordered row and column labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContingencyTable {
    title: String,
    columns: Vec<String>,
    rows: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    /// Count items by `(left(item), top(item))`
    ///
    /// Rows follow `rows` and columns follow `columns` exactly as given.
    /// An item whose top label is not a column is left out of the grid; an
    /// item whose left label is not a row fails the whole table.
    pub fn build<T, FT, FL>(
        columns: &[String],
        rows: &[String],
        items: &[T],
        top: FT,
        left: FL,
    ) -> Result<Self>
    where
        FT: Fn(&T) -> String,
        FL: Fn(&T) -> String,
    {
        let column_index = index_of_labels(columns);
        let row_index = index_of_labels(rows);
        let mut counts = vec![vec![0usize; columns.len()]; rows.len()];

        for item in items {
            let left_label = left(item);
            let Some(&r) = row_index.get(left_label.as_str()) else {
                return Err(StudyError::UnmappedCategory {
                    value: left_label,
                    valid: rows.to_vec(),
                });
            };
            let top_label = top(item);
            match column_index.get(top_label.as_str()) {
                Some(&c) => counts[r][c] += 1,
                None => debug!("Column label '{top_label}' not tabulated; item omitted"),
            }
        }

        Ok(Self {
            title: DEFAULT_TITLE.to_string(),
            columns: columns.to_vec(),
            rows: rows.to_vec(),
            counts,
        })
    }

    /// Replace the top-left header cell
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Count for one cell; 0 for labels outside the grid
    #[must_use]
    pub fn count(&self, row: &str, column: &str) -> usize {
        let r = self.rows.iter().position(|l| l == row);
        let c = self.columns.iter().position(|l| l == column);
        match (r, c) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Sum of all cells
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Render as header `[title, columns...]` plus one row per row label
    #[must_use]
    pub fn to_table(&self) -> Table {
        let header = std::iter::once(self.title.as_str())
            .chain(self.columns.iter().map(String::as_str));
        let mut table = Table::new(header);
        for (label, counts) in self.rows.iter().zip(&self.counts) {
            let mut row = Vec::with_capacity(counts.len() + 1);
            row.push(label.clone());
            row.extend(counts.iter().map(ToString::to_string));
            table.push_row(row);
        }
        table
    }
}

/// Build a contingency table and render it in one step
pub fn contingency_table<T, FT, FL>(
    columns: &[String],
    rows: &[String],
    items: &[T],
    top: FT,
    left: FL,
) -> Result<Table>
where
    FT: Fn(&T) -> String,
    FL: Fn(&T) -> String,
{
    ContingencyTable::build(columns, rows, items, top, left).map(|t| t.to_table())
}

/// First position of every label
fn index_of_labels(labels: &[String]) -> FxHashMap<&str, usize> {
    let mut index = FxHashMap::default();
    for (i, label) in labels.iter().enumerate() {
        index.entry(label.as_str()).or_insert(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    /// (left, top)
    fn items() -> Vec<(&'static str, &'static str)> {
        vec![("positiv", "MS"), ("positiv", "MS"), ("negativ", "GK")]
    }

    #[test]
    fn test_counts_in_given_order() {
        let table = contingency_table(
            &labels(&["MS", "GK"]),
            &labels(&["positiv", "negativ"]),
            &items(),
            |i| i.1.to_string(),
            |i| i.0.to_string(),
        )
        .unwrap();

        assert_eq!(table.header(), labels(&["Title", "MS", "GK"]));
        assert_eq!(table.rows()[0], labels(&["positiv", "2", "0"]));
        assert_eq!(table.rows()[1], labels(&["negativ", "0", "1"]));
    }

    #[test]
    fn test_unknown_left_label_fails() {
        let err = ContingencyTable::build(
            &labels(&["MS", "GK"]),
            &labels(&["positiv"]),
            &items(),
            |i| i.1.to_string(),
            |i| i.0.to_string(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StudyError::UnmappedCategory { ref value, .. } if value == "negativ"
        ));
    }

    #[test]
    fn test_unknown_top_label_is_omitted() {
        let table = ContingencyTable::build(
            &labels(&["MS"]),
            &labels(&["positiv", "negativ"]),
            &items(),
            |i| i.1.to_string(),
            |i| i.0.to_string(),
        )
        .unwrap();
        assert_eq!(table.total(), 2);
        assert_eq!(table.count("negativ", "GK"), 0);
    }

    #[test]
    fn test_title_and_lookup() {
        let table = ContingencyTable::build(
            &labels(&["MS", "GK"]),
            &labels(&["positiv", "negativ"]),
            &items(),
            |i| i.1.to_string(),
            |i| i.0.to_string(),
        )
        .unwrap()
        .with_title("IgG");
        assert_eq!(table.title(), "IgG");
        assert_eq!(table.count("positiv", "MS"), 2);
        assert_eq!(table.total(), 3);
        assert_eq!(table.to_table().header()[0], "IgG");
    }

    #[test]
    fn test_empty_items_yield_zero_grid() {
        let items: Vec<(&str, &str)> = Vec::new();
        let table = contingency_table(
            &labels(&["MS"]),
            &labels(&["a", "b"]),
            &items,
            |i| i.1.to_string(),
            |i| i.0.to_string(),
        )
        .unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[1], labels(&["b", "0"]));
    }
}
