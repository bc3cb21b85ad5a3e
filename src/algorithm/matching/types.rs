//! Type definitions for the matching algorithms
//!
//! Results borrow the subjects they were computed from; nothing is copied
//! until a caller asks for relabeled output.

use crate::algorithm::statistics::Histogram;
use crate::models::Subject;

/// Pair of a control and the case chosen for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlCasePair<'a> {
    /// Control subject
    pub control: &'a Subject,
    /// Case subject
    pub case: &'a Subject,
    /// Absolute age difference between control and case
    pub age_difference: f64,
}

/// Result of partitioned greedy matching
#[derive(Debug, Clone, Default)]
pub struct PartitionedMatch<'a> {
    /// Matched pairs in control-processing order
    pub pairs: Vec<ControlCasePair<'a>>,
    /// Chosen age differences, one per pair, in the same order
    pub histogram: Histogram,
    /// Controls for which no case remained in their partition
    pub unmatched_controls: Vec<&'a Subject>,
    /// Cases left in the pool after all controls were processed
    pub unmatched_case_count: usize,
}

impl<'a> PartitionedMatch<'a> {
    /// Number of matched pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair was matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Matched subjects flattened, control first within each pair
    #[must_use]
    pub fn subjects(&self) -> Vec<&'a Subject> {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.control, pair.case])
            .collect()
    }

    /// Matched subjects as owned records, each control copy relabeled into its case's group
    ///
    /// The control's group becomes "<control group><separator><case group>";
    /// cases are copied unchanged. Source subjects are never modified.
    #[must_use]
    pub fn relabeled_subjects(&self, separator: &str) -> Vec<Subject> {
        self.pairs
            .iter()
            .flat_map(|pair| {
                [
                    pair.control.relabeled(separator, &pair.case.group),
                    pair.case.clone(),
                ]
            })
            .collect()
    }
}

/// Pair committed by the scored matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPair<'a, T> {
    /// Record with the lower source index
    pub a: &'a T,
    /// Record with the higher source index
    pub b: &'a T,
    /// Pair score; always strictly positive
    pub score: f64,
}

/// Result of scored greedy matching
#[derive(Debug, Clone)]
pub struct ScoredMatch<'a, T> {
    /// Pairs ranked by descending score
    pub pairs: Vec<ScoredPair<'a, T>>,
    /// Records that ended up in no pair
    pub unmatched: Vec<&'a T>,
}

impl<T> ScoredMatch<'_, T> {
    /// Number of committed pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair was committed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
