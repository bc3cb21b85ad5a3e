//! Study subject entity model
//!
//! A `Subject` is one row of the study table: demographics plus clinical
//! attributes. Subjects are created once by the loader and never mutated by the
//! engines; relabeling for matched output always works on a copy.

use crate::models::types::{Flag, NaRelInt, NaStatus, Sex};

/// Core record representing one study subject
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// 1-based row number in the source table (0 for subjects built in code)
    pub row: usize,
    /// Subject identifier
    pub id: String,
    /// Laboratory identifier, if recorded
    pub lab_id: Option<String>,
    /// Diagnosis group label, e.g. "RRMS" or the control label
    pub group: String,
    /// Sex of the subject
    pub sex: Sex,
    /// Age in years at examination
    pub age: f64,
    /// Duration of illness in years
    pub disease_duration: Option<f64>,
    /// Expanded Disability Status Scale score
    pub edss: Option<f64>,
    /// IgG index
    pub igg_index: Option<f64>,
    /// Intrathecal IgG synthesis
    pub igg: NaStatus,
    /// Oligoclonal bands
    pub ocb: NaStatus,
    /// MRZ reaction
    pub mrz: NaStatus,
    /// Under disease-modifying therapy
    pub therapy: Flag,
    /// Number of T2 lesions
    pub t2_lesions: NaRelInt,
    /// Number of gadolinium-enhancing lesions
    pub gd_lesions: NaRelInt,
}

impl Subject {
    /// Create a new subject with the fields every record must carry
    #[must_use]
    pub fn new(id: impl Into<String>, group: impl Into<String>, sex: Sex, age: f64) -> Self {
        Self {
            row: 0,
            id: id.into(),
            lab_id: None,
            group: group.into(),
            sex,
            age,
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

    /// Whether the subject belongs to the control group
    #[must_use]
    pub fn is_control(&self, control_label: &str) -> bool {
        self.group == control_label
    }

    /// Absolute age difference to another subject
    #[must_use]
    pub fn age_difference(&self, other: &Self) -> f64 {
        (self.age - other.age).abs()
    }

    /// Return a copy whose group reads "<own group><separator><matched group>"
    ///
    /// The receiver is left untouched, so the source collection can still be
    /// used by other tabulations.
    #[must_use]
    pub fn relabeled(&self, separator: &str, matched_group: &str) -> Self {
        let mut copy = self.clone();
        copy.group = format!("{}{separator}{matched_group}", self.group);
        copy
    }
}
