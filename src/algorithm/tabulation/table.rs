//! String grid produced by the tabulation engine

use std::io::Write;

use itertools::Itertools;

use crate::error::Result;

/// Header plus data rows, every cell already rendered to text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a data row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header followed by all data rows
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    /// Write the table as delimited text
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(writer);
        for record in self.records() {
            csv_writer.write_record(record)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Render with space-padded columns for the terminal
    ///
    /// Cells are separated by a single space; every column except the last is
    /// padded to its widest cell.
    #[must_use]
    pub fn to_aligned_text(&self) -> String {
        let mut widths: Vec<usize> = Vec::new();
        for record in self.records() {
            for (i, cell) in record.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }

        let mut out = String::new();
        for record in self.records() {
            let last = record.len().saturating_sub(1);
            let line = record
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.clone()
                    } else {
                        format!("{cell:<width$}", width = widths[i])
                    }
                })
                .join(" ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Title", "MS", "GK"]);
        table.push_row(vec!["positiv".into(), "12".into(), "0".into()]);
        table.push_row(vec!["n/a".into(), "1".into(), "3".into()]);
        table
    }

    #[test]
    fn test_write_csv_with_delimiter() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf, b';').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Title;MS;GK\npositiv;12;0\nn/a;1;3\n");
    }

    #[test]
    fn test_write_csv_quotes_delimiter_in_cells() {
        let mut table = Table::new(["a"]);
        table.push_row(vec!["1,5".into()]);
        let mut buf = Vec::new();
        table.write_csv(&mut buf, b',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a\n\"1,5\"\n");
    }

    #[test]
    fn test_aligned_text_pads_all_but_last_column() {
        let text = sample().to_aligned_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title   MS GK");
        assert_eq!(lines[1], "positiv 12 0");
        assert_eq!(lines[2], "n/a     1  3");
    }

    #[test]
    fn test_records_starts_with_header() {
        let table = sample();
        let records: Vec<&[String]> = table.records().collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], table.header());
    }
}
