//! Ready-made scoring functions for [`ScoredMatcher`](super::ScoredMatcher)

use crate::models::Subject;

/// Inverse age distance between a control and a case of the same sex
///
/// The returned closure scores `1 / (1 + |age gap|)` when exactly one of the
/// two subjects carries `control_label` and both share a sex. Every other
/// pair, and any pair further apart than `max_gap` years, scores 0.
pub fn case_control_similarity(
    control_label: impl Into<String>,
    max_gap: Option<f64>,
) -> impl Fn(&Subject, &Subject) -> f64 {
    let control_label = control_label.into();
    move |a, b| {
        if a.is_control(&control_label) == b.is_control(&control_label) || a.sex != b.sex {
            return 0.0;
        }
        let gap = a.age_difference(b);
        if max_gap.is_some_and(|max| gap > max) {
            return 0.0;
        }
        1.0 / (1.0 + gap)
    }
}
