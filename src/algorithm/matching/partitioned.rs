//! Partitioned greedy nearest-age matching
//!
//! Controls are processed one at a time in input order. Each control takes the
//! case with the smallest absolute age difference from its own partition
//! (by default: same sex), and that case leaves the pool immediately so no
//! later control can reuse it. Ties go to the first candidate in input order.

use std::hash::Hash;

use indicatif::ProgressBar;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::algorithm::matching::criteria::MatchingConfig;
use crate::algorithm::matching::types::{ControlCasePair, PartitionedMatch};
use crate::models::Subject;
use crate::utils::logging::progress;

/// Matcher pairing every control with its nearest-aged case in the same partition
#[derive(Debug, Clone)]
pub struct PartitionedMatcher {
    config: MatchingConfig,
}

impl PartitionedMatcher {
    /// Create a new matcher with the given configuration
    #[must_use]
    pub const fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Match controls to cases of the same sex
    #[must_use]
    pub fn match_subjects<'a>(&self, subjects: &'a [Subject]) -> PartitionedMatch<'a> {
        self.match_by(subjects, |subject| subject.sex)
    }

    /// Match controls to cases sharing the same partition key
    pub fn match_by<'a, K, F>(&self, subjects: &'a [Subject], partition_key: F) -> PartitionedMatch<'a>
    where
        K: Eq + Hash,
        F: Fn(&Subject) -> K,
    {
        let control_label = self.config.control_label.as_str();

        let controls: Vec<&Subject> = subjects
            .iter()
            .filter(|s| s.is_control(control_label))
            .collect();

        let mut pools: FxHashMap<K, Vec<&Subject>> = FxHashMap::default();
        let mut case_count = 0;
        for case in subjects.iter().filter(|s| self.config.is_case_group(&s.group)) {
            pools.entry(partition_key(case)).or_default().push(case);
            case_count += 1;
        }

        info!(
            "Matching {} controls against {} cases in {} partitions",
            controls.len(),
            case_count,
            pools.len()
        );

        let pb = if self.config.show_progress {
            progress::create_main_progress_bar(controls.len() as u64, Some("Matching controls"))
        } else {
            ProgressBar::hidden()
        };

        let mut result = PartitionedMatch::default();
        for control in controls {
            let chosen = pools.get_mut(&partition_key(control)).and_then(|pool| {
                closest_by_age(pool, control).map(|(idx, diff)| (pool.remove(idx), diff))
            });

            match chosen {
                Some((case, age_difference)) => {
                    debug!(
                        "Control {} matched case {} (age difference {age_difference})",
                        control.id, case.id
                    );
                    result.pairs.push(ControlCasePair {
                        control,
                        case,
                        age_difference,
                    });
                    result.histogram.push(age_difference);
                }
                None => {
                    debug!("No case left for control {}", control.id);
                    result.unmatched_controls.push(control);
                }
            }
            pb.inc(1);
        }

        result.unmatched_case_count = pools.values().map(Vec::len).sum();
        progress::finish_progress_bar(&pb, Some("Matching complete"));

        info!(
            "Matched {} pairs; {} controls and {} cases unmatched",
            result.pairs.len(),
            result.unmatched_controls.len(),
            result.unmatched_case_count
        );

        result
    }

    /// Run the matcher once per case group, each time with the full control pool
    #[must_use]
    pub fn match_all_groups<'a>(
        &self,
        subjects: &'a [Subject],
        case_groups: &[String],
    ) -> Vec<(String, PartitionedMatch<'a>)> {
        case_groups
            .iter()
            .map(|group| {
                let config = MatchingConfig {
                    case_group: Some(group.clone()),
                    ..self.config.clone()
                };
                (group.clone(), Self::new(config).match_subjects(subjects))
            })
            .collect()
    }
}

/// Index and age gap of the first case with the smallest age difference
fn closest_by_age(pool: &[&Subject], control: &Subject) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, case) in pool.iter().enumerate() {
        let diff = control.age_difference(case);
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((idx, diff));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;

    fn subject(id: &str, group: &str, sex: Sex, age: f64) -> Subject {
        Subject::new(id, group, sex, age)
    }

    #[test]
    fn test_nearest_age_pairs() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 30.0),
            subject("c2", "GK", Sex::Female, 50.0),
            subject("x1", "RRMS", Sex::Female, 31.0),
            subject("x2", "RRMS", Sex::Female, 49.0),
        ];
        let result = PartitionedMatcher::new(MatchingConfig::default()).match_subjects(&subjects);

        let ids: Vec<(&str, &str)> = result
            .pairs
            .iter()
            .map(|p| (p.control.id.as_str(), p.case.id.as_str()))
            .collect();
        assert_eq!(ids, [("c1", "x1"), ("c2", "x2")]);
        assert_eq!(result.histogram.values(), &[1.0, 1.0]);
        assert!(result.unmatched_controls.is_empty());
        assert_eq!(result.unmatched_case_count, 0);
    }

    #[test]
    fn test_greedy_in_control_order() {
        // c1 takes x1 even though c2 is closer to it; c2 falls back to x2.
        let subjects = vec![
            subject("c1", "GK", Sex::Male, 40.0),
            subject("c2", "GK", Sex::Male, 45.0),
            subject("x1", "CIS", Sex::Male, 44.0),
            subject("x2", "CIS", Sex::Male, 60.0),
        ];
        let result = PartitionedMatcher::new(MatchingConfig::default()).match_subjects(&subjects);
        assert_eq!(result.pairs[0].case.id, "x1");
        assert_eq!(result.pairs[1].case.id, "x2");
        assert_eq!(result.histogram.values(), &[4.0, 15.0]);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 40.0),
            subject("x1", "CIS", Sex::Female, 38.0),
            subject("x2", "CIS", Sex::Female, 42.0),
        ];
        let result = PartitionedMatcher::new(MatchingConfig::default()).match_subjects(&subjects);
        assert_eq!(result.pairs[0].case.id, "x1");
        assert_eq!(result.unmatched_case_count, 1);
    }

    #[test]
    fn test_partitions_never_mix() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 40.0),
            subject("x1", "CIS", Sex::Male, 40.0),
        ];
        let result = PartitionedMatcher::new(MatchingConfig::default()).match_subjects(&subjects);
        assert!(result.is_empty());
        assert!(result.histogram.is_empty());
        assert_eq!(result.unmatched_controls.len(), 1);
        assert_eq!(result.unmatched_case_count, 1);
    }

    #[test]
    fn test_case_group_restriction() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 40.0),
            subject("x1", "CIS", Sex::Female, 40.0),
            subject("x2", "PPMS", Sex::Female, 45.0),
        ];
        let config = MatchingConfig::builder().case_group("PPMS").build();
        let result = PartitionedMatcher::new(config).match_subjects(&subjects);
        assert_eq!(result.len(), 1);
        assert_eq!(result.pairs[0].case.id, "x2");
    }

    #[test]
    fn test_custom_partition_key() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 40.0),
            subject("x1", "CIS", Sex::Male, 41.0),
        ];
        let result =
            PartitionedMatcher::new(MatchingConfig::default()).match_by(&subjects, |_| ());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_match_all_groups_reuses_controls_per_group() {
        let subjects = vec![
            subject("c1", "GK", Sex::Female, 40.0),
            subject("x1", "CIS", Sex::Female, 41.0),
            subject("x2", "RRMS", Sex::Female, 39.0),
        ];
        let groups = vec!["CIS".to_string(), "RRMS".to_string()];
        let results =
            PartitionedMatcher::new(MatchingConfig::default()).match_all_groups(&subjects, &groups);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "CIS");
        assert_eq!(results[0].1.pairs[0].case.id, "x1");
        assert_eq!(results[1].1.pairs[0].case.id, "x2");
        assert_eq!(results[1].1.pairs[0].control.id, "c1");
    }
}
