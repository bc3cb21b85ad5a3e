//! Projections from a subject to table labels and values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::StudyConfig;
use crate::models::{Flag, NaStatus, Sex, Subject};

/// Label of every non-control subject in [`Category::MsVersusControl`]
pub const MS_LABEL: &str = "MS";

/// Categorical projection of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Diagnosis group
    Group,
    Sex,
    /// Intrathecal IgG synthesis
    IgG,
    /// Oligoclonal bands
    Ocb,
    /// MRZ reaction
    Mrz,
    Therapy,
    /// "MS" for every case, the control label for controls
    MsVersusControl,
}

impl Category {
    /// Short machine name, used for output file names
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Sex => "sex",
            Self::IgG => "igg",
            Self::Ocb => "ocb",
            Self::Mrz => "mrz",
            Self::Therapy => "therapy",
            Self::MsVersusControl => "ms_vs_control",
        }
    }

    /// Every label the projection can produce, in output order
    ///
    /// With `matched` set, group labels are those of a relabeled matched set.
    #[must_use]
    pub fn labels(self, config: &StudyConfig, matched: bool) -> Vec<String> {
        match self {
            Self::Group if matched => config.matched_groups(),
            Self::Group => config.all_groups(),
            Self::Sex => to_strings(&Sex::LABELS),
            Self::IgG | Self::Ocb | Self::Mrz => to_strings(&NaStatus::LABELS),
            Self::Therapy => to_strings(&Flag::LABELS),
            Self::MsVersusControl => vec![MS_LABEL.to_string(), config.control_label.clone()],
        }
    }

    /// Label of one subject
    #[must_use]
    pub fn project(self, subject: &Subject, config: &StudyConfig) -> String {
        match self {
            Self::Group => subject.group.clone(),
            Self::Sex => subject.sex.to_string(),
            Self::IgG => subject.igg.to_string(),
            Self::Ocb => subject.ocb.to_string(),
            Self::Mrz => subject.mrz.to_string(),
            Self::Therapy => subject.therapy.to_string(),
            Self::MsVersusControl => {
                if config.is_control_group(&subject.group) {
                    config.control_label.clone()
                } else {
                    MS_LABEL.to_string()
                }
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Self::Group => "Group",
            Self::Sex => "Sex",
            Self::IgG => "IgG",
            Self::Ocb => "OCB",
            Self::Mrz => "MRZ",
            Self::Therapy => "Therapy",
            Self::MsVersusControl => "MS/Control",
        };
        f.write_str(title)
    }
}

/// Value projection of a subject, absent where the subject has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Age,
    DiseaseDuration,
    Edss,
    IggIndex,
    T2Lesions,
    GdLesions,
}

impl Measure {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::DiseaseDuration => "disease_duration",
            Self::Edss => "edss",
            Self::IggIndex => "igg_index",
            Self::T2Lesions => "t2_lesions",
            Self::GdLesions => "gd_lesions",
        }
    }

    /// Rendered value, or `None` when absent
    #[must_use]
    pub fn project(self, subject: &Subject) -> Option<String> {
        match self {
            Self::Age => Some(subject.age.to_string()),
            Self::DiseaseDuration => subject.disease_duration.map(|v| v.to_string()),
            Self::Edss => subject.edss.map(|v| v.to_string()),
            Self::IggIndex => subject.igg_index.map(|v| v.to_string()),
            Self::T2Lesions => subject.t2_lesions.value().map(|v| v.to_string()),
            Self::GdLesions => subject.gd_lesions.value().map(|v| v.to_string()),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            Self::Age => "Age",
            Self::DiseaseDuration => "Disease duration",
            Self::Edss => "EDSS",
            Self::IggIndex => "IgG index",
            Self::T2Lesions => "T2 lesions",
            Self::GdLesions => "Gd lesions",
        };
        f.write_str(title)
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(ToString::to_string).collect()
}
