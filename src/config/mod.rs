//! Configuration for loading and analysing a study table.
//!
//! Fixed enumerations (group labels, column headers) live here and are passed
//! explicitly into the loader and the engines.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{Result, StudyError};
use crate::loader::mapping::SubjectField;

/// Configuration for a study run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Group label of control subjects
    pub control_label: String,
    /// Case group labels, in output order
    pub case_groups: Vec<String>,
    /// Separator between own and matched group when relabeling controls
    pub relabel_separator: String,
    /// Whether numbers use a decimal comma ("1,5")
    pub decimal_comma: bool,
    /// Field delimiter of delimited text input; must be ASCII and cannot be
    /// ',' together with `decimal_comma`
    pub delimiter: char,
    /// Source column header to subject field
    pub columns: BTreeMap<String, SubjectField>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        let columns = [
            ("Nr", SubjectField::Id),
            ("Labor-Nr", SubjectField::LabId),
            ("Gruppe", SubjectField::Group),
            ("Geschlecht", SubjectField::Sex),
            ("Alter", SubjectField::Age),
            ("Krankheitsdauer", SubjectField::DiseaseDuration),
            ("EDSS", SubjectField::Edss),
            ("IgG-Index", SubjectField::IggIndex),
            ("IgG", SubjectField::Igg),
            ("OKB", SubjectField::Ocb),
            ("MRZ", SubjectField::Mrz),
            ("Therapie", SubjectField::Therapy),
            ("T2-Läsionen", SubjectField::T2Lesions),
            ("Gd-Läsionen", SubjectField::GdLesions),
        ]
        .into_iter()
        .map(|(column, field)| (column.to_string(), field))
        .collect();

        Self {
            control_label: "GK".to_string(),
            case_groups: ["CIS", "RRMS", "SPMS", "PPMS"]
                .into_iter()
                .map(String::from)
                .collect(),
            relabel_separator: "-".to_string(),
            decimal_comma: true,
            delimiter: ';',
            columns,
        }
    }
}

impl StudyConfig {
    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "study configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the group enumeration is consistent
    pub fn validate(&self) -> Result<()> {
        if self.control_label.trim().is_empty() {
            return Err(StudyError::Config("control label must not be empty".to_string()));
        }

        let mut seen = FxHashSet::default();
        for group in &self.case_groups {
            if group == &self.control_label {
                return Err(StudyError::Config(format!(
                    "case group '{group}' equals the control label"
                )));
            }
            if !seen.insert(group.as_str()) {
                return Err(StudyError::Config(format!("duplicate case group '{group}'")));
            }
        }

        if self.relabel_separator.is_empty() {
            return Err(StudyError::Config("relabel separator must not be empty".to_string()));
        }

        self.delimiter_byte()?;
        if self.decimal_comma && self.delimiter == ',' {
            return Err(StudyError::Config(
                "delimiter ',' collides with the decimal comma".to_string(),
            ));
        }

        Ok(())
    }

    /// The delimiter as the single byte the CSV reader and writer take
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                StudyError::Config(format!(
                    "delimiter '{}' is not a single-byte character",
                    self.delimiter
                ))
            })
    }

    /// All group labels a subject may carry: controls first, then the case groups
    #[must_use]
    pub fn all_groups(&self) -> Vec<String> {
        std::iter::once(self.control_label.clone())
            .chain(self.case_groups.iter().cloned())
            .collect()
    }

    /// Whether a label is the control label or one of the case groups
    #[must_use]
    pub fn is_known_group(&self, label: &str) -> bool {
        label == self.control_label || self.case_groups.iter().any(|g| g == label)
    }

    /// Group labels of the relabeled controls, e.g. "GK-RRMS", per case group
    #[must_use]
    pub fn matched_control_groups(&self) -> Vec<String> {
        self.case_groups
            .iter()
            .map(|g| format!("{}{}{g}", self.control_label, self.relabel_separator))
            .collect()
    }

    /// Group labels of a matched subject set: each relabeled control group
    /// directly before the case group it was matched into
    #[must_use]
    pub fn matched_groups(&self) -> Vec<String> {
        self.matched_control_groups()
            .into_iter()
            .zip(self.case_groups.iter().cloned())
            .flat_map(|(control, case)| [control, case])
            .collect()
    }

    /// Source column header bound to a field, if any
    #[must_use]
    pub fn column_for(&self, field: SubjectField) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, f)| **f == field)
            .map(|(column, _)| column.as_str())
    }

    /// Whether a label marks a control, relabeled or not
    #[must_use]
    pub fn is_control_group(&self, label: &str) -> bool {
        label
            .strip_prefix(self.control_label.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(self.relabel_separator.as_str()))
    }
}

impl fmt::Display for StudyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Study Configuration:")?;
        writeln!(f, "  Control Label: {}", self.control_label)?;
        writeln!(f, "  Case Groups: {}", self.case_groups.join(", "))?;
        writeln!(f, "  Decimal Comma: {}", self.decimal_comma)?;
        writeln!(f, "  Delimiter: {:?}", self.delimiter)?;
        writeln!(f, "  Mapped Columns: {}", self.columns.len())
    }
}
