//! Loading subjects from delimited text or Parquet files
//!
//! The loader binds source columns to subject fields through the study
//! configuration, validates every cell and fails on the first bad row.

pub mod mapping;
pub mod source;

use std::path::Path;
use std::time::Instant;

use log::debug;

use crate::algorithm::tabulation::Table;
use crate::config::StudyConfig;
use crate::error::{Result, StudyError};
use crate::models::Subject;
use crate::utils::logging::{create_spinner, finish_and_clear, log_operation_complete, log_operation_start};

pub use mapping::{SubjectDraft, SubjectField};
pub use source::{RawTable, SourceFormat};

/// Load all subjects of a study table
pub fn load_subjects(path: &Path, config: &StudyConfig) -> Result<Vec<Subject>> {
    config.validate()?;
    let start = Instant::now();
    log_operation_start("Loading subjects from", path);
    let spinner = create_spinner(Some("Loading subjects"));

    let result = source::read_table(path, config).and_then(|table| subjects_from_table(&table, config));
    finish_and_clear(&spinner);

    let subjects = result?;
    log_operation_complete("loaded", path, subjects.len(), Some(start.elapsed()));
    Ok(subjects)
}

/// Convert raw rows into subjects
///
/// Row numbers in errors count data rows from 1. A row may be shorter than the
/// header but never longer. Rows with an empty group are skipped; any other
/// group outside the configuration is an error.
pub fn subjects_from_table(table: &RawTable, config: &StudyConfig) -> Result<Vec<Subject>> {
    let mut bindings: Vec<(usize, SubjectField)> = Vec::new();
    for (index, column) in table.header.iter().enumerate() {
        match config.columns.get(column.trim()) {
            Some(field) => bindings.push((index, *field)),
            None => debug!("Ignoring unmapped column '{column}'"),
        }
    }

    for required in SubjectField::REQUIRED {
        if !bindings.iter().any(|(_, field)| *field == required) {
            return Err(StudyError::MissingColumn {
                column: config
                    .column_for(required)
                    .unwrap_or(required.label())
                    .to_string(),
                field: required.label().to_string(),
            });
        }
    }

    let group_index = bindings
        .iter()
        .find(|(_, field)| *field == SubjectField::Group)
        .map(|(index, _)| *index);

    let mut subjects = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        let row_number = i + 1;
        if row.len() > table.header.len() {
            return Err(StudyError::ExtraFields {
                row: row_number,
                expected: table.header.len(),
                found: row.len(),
            });
        }
        let cell = |index: usize| row.get(index).map_or("", |v| v.trim());

        let group = group_index.map_or("", cell);
        if group.is_empty() {
            debug!("Skipping row {row_number} without group");
            continue;
        }
        if !config.is_known_group(group) {
            return Err(StudyError::InvalidCategory {
                field: SubjectField::Group.label().to_string(),
                value: group.to_string(),
                row: row_number,
            });
        }

        let mut draft = SubjectDraft::new(row_number);
        for (index, field) in &bindings {
            field.apply(&mut draft, cell(*index), config.decimal_comma)?;
        }
        subjects.push(draft.finish()?);
    }

    Ok(subjects)
}

/// List subjects as a table with the configured column headers
///
/// The result reads back through [`subjects_from_table`] when its groups are
/// known to the configuration.
#[must_use]
pub fn subjects_to_table(subjects: &[Subject], config: &StudyConfig) -> Table {
    let mut table = Table::new(
        SubjectField::ALL
            .iter()
            .map(|field| config.column_for(*field).unwrap_or(field.label())),
    );
    for subject in subjects {
        table.push_row(SubjectField::ALL.iter().map(|field| field.render(subject)).collect());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(header: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            header: header.iter().map(ToString::to_string).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn test_rows_without_group_are_skipped() {
        let table = raw(
            &["Nr", "Gruppe", "Geschlecht", "Alter", "Bemerkung"],
            &[
                &["1", "GK", "w", "30"],
                &["2", "", "m", "40"],
                &["3", "RRMS", "m", "41,5", "egal"],
            ],
        );
        let subjects = subjects_from_table(&table, &StudyConfig::default()).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[1].row, 3);
        assert!((subjects[1].age - 41.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rows_longer_than_header_are_rejected() {
        let table = raw(
            &["Nr", "Gruppe", "Geschlecht", "Alter"],
            &[&["1", "GK", "w", "30"], &["2", "", "m", "30", "5"]],
        );
        let err = subjects_from_table(&table, &StudyConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            StudyError::ExtraFields {
                row: 2,
                expected: 4,
                found: 5
            }
        ));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_missing_required_column() {
        let table = raw(&["Nr", "Gruppe", "Alter"], &[]);
        let err = subjects_from_table(&table, &StudyConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            StudyError::MissingColumn { ref column, .. } if column == "Geschlecht"
        ));
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let table = raw(
            &["Nr", "Gruppe", "Geschlecht", "Alter"],
            &[&["1", "ALS", "w", "30"]],
        );
        let err = subjects_from_table(&table, &StudyConfig::default()).unwrap_err();
        assert!(matches!(err, StudyError::InvalidCategory { row: 1, .. }));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_listing_round_trip() {
        let config = StudyConfig::default();
        let table = raw(
            &["Nr", "Gruppe", "Geschlecht", "Alter", "EDSS", "OKB"],
            &[&["1", "CIS", "w", "30", "2,5", "positiv"]],
        );
        let subjects = subjects_from_table(&table, &config).unwrap();

        let listing = subjects_to_table(&subjects, &config);
        let reread = subjects_from_table(
            &RawTable {
                header: listing.header().to_vec(),
                rows: listing.rows().to_vec(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(reread, subjects);
    }
}
