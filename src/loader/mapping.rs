//! Column-to-field mapping
//!
//! Every source column the configuration knows is bound to a [`SubjectField`];
//! each field knows how to parse its cell into the subject under construction.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};
use crate::models::{Flag, NaRelInt, NaStatus, Sex, Subject};

/// Subject attribute a source column maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectField {
    Id,
    LabId,
    Group,
    Sex,
    Age,
    DiseaseDuration,
    Edss,
    IggIndex,
    Igg,
    Ocb,
    Mrz,
    Therapy,
    T2Lesions,
    GdLesions,
}

impl SubjectField {
    /// Fields every input must provide a column for
    pub const REQUIRED: [Self; 4] = [Self::Id, Self::Group, Self::Sex, Self::Age];

    /// Every field, in listing order
    pub const ALL: [Self; 14] = [
        Self::Id,
        Self::LabId,
        Self::Group,
        Self::Sex,
        Self::Age,
        Self::DiseaseDuration,
        Self::Edss,
        Self::IggIndex,
        Self::Igg,
        Self::Ocb,
        Self::Mrz,
        Self::Therapy,
        Self::T2Lesions,
        Self::GdLesions,
    ];

    /// Name used in error messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::LabId => "lab id",
            Self::Group => "group",
            Self::Sex => "sex",
            Self::Age => "age",
            Self::DiseaseDuration => "disease duration",
            Self::Edss => "EDSS",
            Self::IggIndex => "IgG index",
            Self::Igg => "IgG",
            Self::Ocb => "OCB",
            Self::Mrz => "MRZ",
            Self::Therapy => "therapy",
            Self::T2Lesions => "T2 lesions",
            Self::GdLesions => "Gd lesions",
        }
    }

    /// Parse a trimmed cell into the draft
    pub fn apply(self, draft: &mut SubjectDraft, value: &str, decimal_comma: bool) -> Result<()> {
        let row = draft.row;
        let invalid = || StudyError::InvalidCategory {
            field: self.label().to_string(),
            value: value.to_string(),
            row,
        };

        match self {
            Self::Id => draft.id = Some(value.to_string()),
            Self::LabId => draft.lab_id = (!value.is_empty()).then(|| value.to_string()),
            Self::Group => draft.group = Some(value.to_string()),
            Self::Sex => draft.sex = Some(value.parse::<Sex>().map_err(|_| invalid())?),
            Self::Age => draft.age = self.number(value, row, decimal_comma)?,
            Self::DiseaseDuration => {
                draft.disease_duration = self.number(value, row, decimal_comma)?;
            }
            Self::Edss => draft.edss = self.number(value, row, decimal_comma)?,
            Self::IggIndex => draft.igg_index = self.number(value, row, decimal_comma)?,
            Self::Igg => draft.igg = value.parse::<NaStatus>().map_err(|_| invalid())?,
            Self::Ocb => draft.ocb = value.parse::<NaStatus>().map_err(|_| invalid())?,
            Self::Mrz => draft.mrz = value.parse::<NaStatus>().map_err(|_| invalid())?,
            Self::Therapy => draft.therapy = value.parse::<Flag>().map_err(|_| invalid())?,
            Self::T2Lesions => {
                draft.t2_lesions = value.parse::<NaRelInt>().map_err(|_| invalid())?;
            }
            Self::GdLesions => {
                draft.gd_lesions = value.parse::<NaRelInt>().map_err(|_| invalid())?;
            }
        }
        Ok(())
    }

    /// Render the field of a subject as a cell that [`apply`](Self::apply) reads back
    #[must_use]
    pub fn render(self, subject: &Subject) -> String {
        let optional = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        match self {
            Self::Id => subject.id.clone(),
            Self::LabId => subject.lab_id.clone().unwrap_or_default(),
            Self::Group => subject.group.clone(),
            Self::Sex => subject.sex.to_string(),
            Self::Age => subject.age.to_string(),
            Self::DiseaseDuration => optional(subject.disease_duration),
            Self::Edss => optional(subject.edss),
            Self::IggIndex => optional(subject.igg_index),
            Self::Igg => subject.igg.to_string(),
            Self::Ocb => subject.ocb.to_string(),
            Self::Mrz => subject.mrz.to_string(),
            Self::Therapy => subject.therapy.to_string(),
            Self::T2Lesions => subject.t2_lesions.to_string(),
            Self::GdLesions => subject.gd_lesions.to_string(),
        }
    }

    fn number(self, value: &str, row: usize, decimal_comma: bool) -> Result<Option<f64>> {
        parse_number(value, decimal_comma).map_err(|()| StudyError::InvalidNumber {
            field: self.label().to_string(),
            value: value.to_string(),
            row,
        })
    }
}

/// Parse an optional finite number; an empty cell is absent
///
/// With `decimal_comma`, "1,5" reads as 1.5 and "." is still accepted.
pub(crate) fn parse_number(value: &str, decimal_comma: bool) -> std::result::Result<Option<f64>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = if decimal_comma {
        value.replace(',', ".").parse::<f64>()
    } else {
        value.parse::<f64>()
    };
    match parsed {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(()),
    }
}

/// Subject under construction from one source row
#[derive(Debug, Clone)]
pub struct SubjectDraft {
    row: usize,
    id: Option<String>,
    lab_id: Option<String>,
    group: Option<String>,
    sex: Option<Sex>,
    age: Option<f64>,
    disease_duration: Option<f64>,
    edss: Option<f64>,
    igg_index: Option<f64>,
    igg: NaStatus,
    ocb: NaStatus,
    mrz: NaStatus,
    therapy: Flag,
    t2_lesions: NaRelInt,
    gd_lesions: NaRelInt,
}

impl SubjectDraft {
    /// Start a draft for the given 1-based source row
    #[must_use]
    pub const fn new(row: usize) -> Self {
        Self {
            row,
            id: None,
            lab_id: None,
            group: None,
            sex: None,
            age: None,
            disease_duration: None,
            edss: None,
            igg_index: None,
            igg: NaStatus::NotAvailable,
            ocb: NaStatus::NotAvailable,
            mrz: NaStatus::NotAvailable,
            therapy: Flag::NotAvailable,
            t2_lesions: NaRelInt::NotAvailable,
            gd_lesions: NaRelInt::NotAvailable,
        }
    }

    /// Complete the subject; sex and age must have been set
    pub fn finish(self) -> Result<Subject> {
        let row = self.row;
        let sex = self.sex.ok_or_else(|| StudyError::InvalidCategory {
            field: SubjectField::Sex.label().to_string(),
            value: String::new(),
            row,
        })?;
        let age = self.age.ok_or_else(|| StudyError::InvalidNumber {
            field: SubjectField::Age.label().to_string(),
            value: String::new(),
            row,
        })?;

        let mut subject = Subject::new(
            self.id.unwrap_or_default(),
            self.group.unwrap_or_default(),
            sex,
            age,
        );
        subject.row = row;
        subject.lab_id = self.lab_id;
        subject.disease_duration = self.disease_duration;
        subject.edss = self.edss;
        subject.igg_index = self.igg_index;
        subject.igg = self.igg;
        subject.ocb = self.ocb;
        subject.mrz = self.mrz;
        subject.therapy = self.therapy;
        subject.t2_lesions = self.t2_lesions;
        subject.gd_lesions = self.gd_lesions;
        Ok(subject)
    }
}
