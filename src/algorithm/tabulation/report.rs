//! Batch rendering of the study tables
//!
//! Each table is independent of the others; a failing table is reported in
//! its own slot and never stops the rest.

use std::fmt;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::tabulation::contingency::ContingencyTable;
use crate::algorithm::tabulation::grouped::grouped_values_table;
use crate::algorithm::tabulation::projection::{Category, Measure};
use crate::algorithm::tabulation::table::Table;
use crate::config::StudyConfig;
use crate::error::Result;
use crate::models::Subject;

/// Description of one output table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableSpec {
    /// Counts of `left` labels (rows) against `top` labels (columns)
    Contingency { top: Category, left: Category },
    /// Values of `measure`, one column per `category` label
    Grouped { category: Category, measure: Measure },
}

impl TableSpec {
    /// File stem for the rendered table
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Contingency { top, left } => format!("{}_by_{}", left.name(), top.name()),
            Self::Grouped { category, measure } => {
                format!("{}_by_{}", measure.name(), category.name())
            }
        }
    }

    /// Render this table from `subjects`
    ///
    /// `matched` selects the group labels of a relabeled matched set.
    pub fn render(&self, subjects: &[Subject], config: &StudyConfig, matched: bool) -> Result<Table> {
        match *self {
            Self::Contingency { top, left } => {
                let table = ContingencyTable::build(
                    &top.labels(config, matched),
                    &left.labels(config, matched),
                    subjects,
                    |s| top.project(s, config),
                    |s| left.project(s, config),
                )?;
                Ok(table.with_title(left.to_string()).to_table())
            }
            Self::Grouped { category, measure } => grouped_values_table(
                &category.labels(config, matched),
                subjects,
                |s| category.project(s, config),
                |s| measure.project(s),
            ),
        }
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contingency { top, left } => write!(f, "{left} x {top}"),
            Self::Grouped { category, measure } => write!(f, "{measure} per {category}"),
        }
    }
}

/// Render every table in parallel, keeping the order of `specs`
pub fn render_all(
    specs: &[TableSpec],
    subjects: &[Subject],
    config: &StudyConfig,
    matched: bool,
) -> Vec<(TableSpec, Result<Table>)> {
    specs
        .par_iter()
        .map(|spec| {
            let result = spec.render(subjects, config, matched);
            match &result {
                Ok(table) => debug!("Rendered {spec} with {} rows", table.rows().len()),
                Err(e) => warn!("Failed to render {spec}: {e}"),
            }
            (*spec, result)
        })
        .collect()
}

/// The standard set of study tables
#[must_use]
pub fn default_specs() -> Vec<TableSpec> {
    let mut specs = vec![TableSpec::Contingency {
        top: Category::Group,
        left: Category::Sex,
    }];
    specs.extend(
        [Category::IgG, Category::Ocb, Category::Mrz, Category::Therapy]
            .into_iter()
            .map(|left| TableSpec::Contingency {
                top: Category::MsVersusControl,
                left,
            }),
    );
    specs.extend(
        [
            Measure::Age,
            Measure::DiseaseDuration,
            Measure::Edss,
            Measure::IggIndex,
            Measure::T2Lesions,
            Measure::GdLesions,
        ]
        .into_iter()
        .map(|measure| TableSpec::Grouped {
            category: Category::Group,
            measure,
        }),
    );
    specs
}
