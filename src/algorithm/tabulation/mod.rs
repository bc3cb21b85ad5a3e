//! Tabulation of study subjects into output tables
//!
//! Two table shapes exist: a contingency table counting subjects per pair of
//! labels, and a grouped-values table listing one column of values per label.
//! Both produce a [`Table`] of strings; writing it anywhere is up to the caller.

pub mod contingency;
pub mod grouped;
pub mod projection;
pub mod report;
pub mod table;

pub use contingency::{ContingencyTable, contingency_table};
pub use grouped::grouped_values_table;
pub use projection::{Category, Measure};
pub use report::{TableSpec, default_specs, render_all};
pub use table::Table;
