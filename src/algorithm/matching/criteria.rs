//! Matching configuration for case-control matching
//!
//! This module provides the structure and builder used to configure the
//! partitioned matcher.

use crate::config::StudyConfig;

/// Configuration for the matching process
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Group label identifying control subjects
    pub control_label: String,

    /// Restrict the case pool to one group; `None` pools every non-control subject
    pub case_group: Option<String>,

    /// Separator used when relabeling matched controls ("GK" + "-" + "RRMS")
    pub relabel_separator: String,

    /// Whether to draw a progress bar while matching
    pub show_progress: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            control_label: "GK".to_string(),
            case_group: None,
            relabel_separator: "-".to_string(),
            show_progress: false,
        }
    }
}

impl MatchingConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing matching configuration
    #[must_use]
    pub fn builder() -> MatchingConfigBuilder {
        MatchingConfigBuilder::new()
    }

    /// Derive a configuration from the study configuration
    #[must_use]
    pub fn from_study(study: &StudyConfig) -> Self {
        Self {
            control_label: study.control_label.clone(),
            relabel_separator: study.relabel_separator.clone(),
            ..Self::default()
        }
    }

    /// Whether a group label belongs to the case pool
    #[must_use]
    pub fn is_case_group(&self, group: &str) -> bool {
        group != self.control_label
            && self.case_group.as_deref().is_none_or(|wanted| wanted == group)
    }
}

/// Builder for constructing matching configuration
#[derive(Debug, Clone)]
pub struct MatchingConfigBuilder {
    config: MatchingConfig,
}

impl Default for MatchingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatchingConfig::default(),
        }
    }

    /// Set the control group label
    #[must_use]
    pub fn control_label(mut self, label: impl Into<String>) -> Self {
        self.config.control_label = label.into();
        self
    }

    /// Restrict matching to cases of one group
    #[must_use]
    pub fn case_group(mut self, group: impl Into<String>) -> Self {
        self.config.case_group = Some(group.into());
        self
    }

    /// Set the relabel separator
    #[must_use]
    pub fn relabel_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.relabel_separator = separator.into();
        self
    }

    /// Set whether to show a progress bar
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Build the matching configuration
    #[must_use]
    pub fn build(self) -> MatchingConfig {
        self.config
    }
}
