//! Summary statistics over an ordered sequence of numbers
//!
//! A `Histogram` collects values (e.g. the age gaps chosen while matching) in
//! insertion order. Statistics are derived on demand and never reorder the
//! stored values.
//!
//! All statistics require a non-empty histogram; callers check `is_empty`
//! first. On an empty histogram every statistic is NaN.

use std::fmt;

/// Ordered collection of numeric values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    values: Vec<f64>,
}

impl Histogram {
    /// Create an empty histogram
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Values in insertion order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest value, seeded from the first element
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
    }

    /// Largest value, seeded from the first element
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
    }

    /// Arithmetic mean
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Positional median over insertion order
    ///
    /// The values are not sorted first: for an odd count this is the middle
    /// element, for an even count the average of the two middle elements, as
    /// stored. Use [`Histogram::sorted`] first for the statistical median.
    #[must_use]
    pub fn median(&self) -> f64 {
        let n = self.values.len();
        match n {
            0 => f64::NAN,
            _ if n % 2 == 1 => self.values[n / 2],
            _ => (self.values[n / 2 - 1] + self.values[n / 2]) / 2.0,
        }
    }

    /// A copy with the values in ascending order
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut values = self.values.clone();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    /// All statistics at once
    #[must_use]
    pub fn summary(&self) -> HistogramSummary {
        HistogramSummary {
            count: self.len(),
            min: self.min(),
            max: self.max(),
            mean: self.mean(),
            median: self.median(),
        }
    }
}

impl FromIterator<f64> for Histogram {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<f64> for Histogram {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// Snapshot of the statistics of a histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSummary {
    /// Number of values
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Positional median
    pub median: f64,
}

impl fmt::Display for HistogramSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} min={:.2} max={:.2} mean={:.2} median={:.2}",
            self.count, self.min, self.max, self.mean, self.median
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_basic_statistics() {
        let h: Histogram = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert!(approx(h.mean(), 2.5));
        assert!(approx(h.median(), 2.5));
        assert!(approx(h.min(), 1.0));
        assert!(approx(h.max(), 4.0));
    }

    #[test]
    fn test_min_max_not_clamped_to_zero() {
        let negative: Histogram = [-5.0, -3.0, -1.0].into_iter().collect();
        assert!(approx(negative.min(), -5.0));
        assert!(approx(negative.max(), -1.0));

        let positive: Histogram = [7.0, 3.5, 9.0].into_iter().collect();
        assert!(approx(positive.min(), 3.5));
    }

    #[test]
    fn test_median_is_positional() {
        // Middle element as stored, not the sorted median (4.0).
        let odd: Histogram = [9.0, 1.0, 4.0].into_iter().collect();
        assert!(approx(odd.median(), 1.0));
        assert!(approx(odd.sorted().median(), 4.0));

        let even: Histogram = [10.0, 0.0, 2.0, 8.0].into_iter().collect();
        assert!(approx(even.median(), 1.0));
        assert!(approx(even.sorted().median(), 5.0));
    }

    #[test]
    fn test_sorted_does_not_touch_original() {
        let h: Histogram = [3.0, 1.0, 2.0].into_iter().collect();
        let _ = h.sorted();
        assert_eq!(h.values(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_histogram_yields_nan() {
        let h = Histogram::new();
        assert!(h.is_empty());
        let summary = h.summary();
        assert_eq!(summary.count, 0);
        assert!(summary.min.is_nan());
        assert!(summary.max.is_nan());
        assert!(summary.mean.is_nan());
        assert!(summary.median.is_nan());
    }
}
