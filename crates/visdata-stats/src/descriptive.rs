use serde::Serialize;

/// Descriptive statistics summarizing one set of samples.
///
/// Statistics that cannot be computed are reported as `f64::NAN` rather than
/// as an error: every field except `count` is NaN for an empty set, and `std`
/// and `sem` are NaN for a set with a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of samples.
    pub count: usize,
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The median (average of the two middle values for an even count).
    pub median: f64,
    /// The sample standard deviation with Bessel's correction (divisor `n - 1`).
    pub std: f64,
    /// The standard error of the mean (`std / sqrt(n)`).
    pub sem: f64,
}

impl DescriptiveStats {
    /// Statistics of an empty sample set.
    pub const EMPTY: Self = Self {
        count: 0,
        min: f64::NAN,
        max: f64::NAN,
        mean: f64::NAN,
        median: f64::NAN,
        std: f64::NAN,
        sem: f64::NAN,
    };

    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visdata_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([3.0, 1.0, 2.0]);
    /// assert_eq!(stats.count, 3);
    /// assert_eq!(stats.mean, 2.0);
    /// assert_eq!(stats.median, 2.0);
    /// assert_eq!(stats.std, 1.0);
    /// assert_eq!(stats.sem, 1.0 / 3.0_f64.sqrt());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visdata_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[4.0]);
    /// assert_eq!(stats.mean, 4.0);
    /// assert_eq!(stats.median, 4.0);
    /// assert!(stats.std.is_nan());
    /// assert!(stats.sem.is_nan());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self::EMPTY;
        };
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = compute_median(sorted_values);
        let std = if count > 1 {
            let squared_deviations = sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>();
            (squared_deviations / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };
        let sem = std / n.sqrt();

        Self {
            count,
            min,
            max,
            mean,
            median,
            std,
            sem,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Computes the median of sorted data.
///
/// For an even number of values this is the average of the two middle values.
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use visdata_stats::descriptive::compute_median;
///
/// assert_eq!(compute_median(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(compute_median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
/// assert!(compute_median(&[]).is_nan());
/// ```
#[must_use]
pub fn compute_median(sorted_values: &[f64]) -> f64 {
    let n = sorted_values.len();
    match n {
        0 => f64::NAN,
        _ if n % 2 == 1 => sorted_values[n / 2],
        _ => (sorted_values[n / 2 - 1] + sorted_values[n / 2]) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_all_nan() {
        let stats = DescriptiveStats::new(std::iter::empty());
        assert!(stats.is_empty());
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.std.is_nan());
        assert!(stats.sem.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.max.is_nan());
    }

    #[test]
    fn test_bessel_correction() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        // population variance would be 4.0; the sample variance is 32 / 7
        assert!((stats.std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!((stats.sem - stats.std / 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.median, 4.5);
    }

    #[test]
    fn test_identical_values_have_zero_spread() {
        let stats = DescriptiveStats::new([3.5; 4]);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.sem, 0.0);
        assert_eq!(stats.min, 3.5);
        assert_eq!(stats.max, 3.5);
    }

    #[test]
    fn test_median_of_even_and_odd_counts() {
        assert_eq!(compute_median(&[1.0, 3.0, 4.0, 8.0, 9.0, 12.0]), 6.0);
        assert_eq!(compute_median(&[-2.0, 0.5, 7.0]), 0.5);
        assert_eq!(compute_median(&[42.0]), 42.0);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[2.0, 1.0]);
    }
}
