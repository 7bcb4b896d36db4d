//! Bin specifications, bin edges and strategies for partitioning paired samples
//!
//! A binning divides the x-axis into `k` contiguous bins described by `k + 1`
//! ascending edges. Every bin is half-open, `[edge[i], edge[i + 1])`, except the
//! last one, which is closed on both ends so that the maximum edge itself
//! belongs to a bin.
//!
//! # Examples
//!
//! ```
//! use visdata_stats::binning::{BinSpec, BinningStrategyKind};
//!
//! let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
//!
//! let edges = BinSpec::Count(3).edges(&x).unwrap();
//! assert_eq!(edges.num_bins(), 3);
//!
//! let bins = BinningStrategyKind::Vectorized.partition(&edges, &x, &y);
//! assert_eq!(bins, vec![vec![0.0, 10.0], vec![20.0, 30.0], vec![40.0, 50.0]]);
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Errors raised while turning a [`BinSpec`] into [`BinEdges`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinSpecError {
    #[display("number of bins must be positive")]
    ZeroBinCount,
    #[display("at least 2 bin edges are required, got {len}")]
    TooFewEdges { len: usize },
    #[display("bin edges must be strictly ascending (edge {index} is {value})")]
    EdgesNotAscending { index: usize, value: f64 },
    #[display("bin edge {index} is not finite ({value})")]
    NonFiniteEdge { index: usize, value: f64 },
    #[display("cannot derive bin edges from empty data")]
    EmptyData,
    #[display("cannot derive bin edges: data range [{min}, {max}] is not finite")]
    NonFiniteRange { min: f64, max: f64 },
    #[display("too many bins ({num_bins}) for data range [{min}, {max}]")]
    TooManyBinsForRange { num_bins: usize, min: f64, max: f64 },
}

/// How the bins of a binning are specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinSpec {
    /// Equal-width bins spanning the observed data range.
    Count(usize),
    /// Explicit, strictly ascending bin edges.
    Edges(Vec<f64>),
}

impl Default for BinSpec {
    fn default() -> Self {
        Self::Count(10)
    }
}

impl From<usize> for BinSpec {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<f64>> for BinSpec {
    fn from(edges: Vec<f64>) -> Self {
        Self::Edges(edges)
    }
}

impl BinSpec {
    /// Checks the specification without looking at any data.
    pub fn validate(&self) -> Result<(), BinSpecError> {
        match self {
            Self::Count(0) => Err(BinSpecError::ZeroBinCount),
            Self::Count(_) => Ok(()),
            Self::Edges(edges) => BinEdges::validate(edges),
        }
    }

    /// Resolves the bin edges for the given data.
    ///
    /// Explicit edges are validated and returned as is. For a bin count the
    /// edges partition `[min(values), max(values)]` into equal widths, with the
    /// last edge exactly at the maximum. A degenerate range (all values equal)
    /// is widened to `[min - 0.5, max + 0.5]`.
    ///
    /// Fails with [`BinSpecError::TooManyBinsForRange`] when the range is too
    /// narrow for its magnitude to hold `count` distinct edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use visdata_stats::binning::BinSpec;
    ///
    /// let edges = BinSpec::Count(4).edges(&[2.0, 6.0, 4.0]).unwrap();
    /// assert_eq!(edges.as_slice(), &[2.0, 3.0, 4.0, 5.0, 6.0]);
    ///
    /// let edges = BinSpec::Count(2).edges(&[1.0, 1.0]).unwrap();
    /// assert_eq!(edges.as_slice(), &[0.5, 1.0, 1.5]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn edges(&self, values: &[f64]) -> Result<BinEdges, BinSpecError> {
        let count = match self {
            Self::Count(0) => return Err(BinSpecError::ZeroBinCount),
            Self::Count(count) => *count,
            Self::Edges(edges) => return BinEdges::new(edges.clone()),
        };

        if values.is_empty() {
            return Err(BinSpecError::EmptyData);
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if values.iter().any(|v| !v.is_finite()) {
            return Err(BinSpecError::NonFiniteRange { min, max });
        }

        let (first, last) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        // Interpolate instead of stepping: `last - first` overflows for
        // ranges wider than `f64::MAX`.
        let n = count as f64;
        let edges = (0..=count)
            .map(|i| match i {
                0 => first,
                _ if i == count => last,
                _ => first * ((count - i) as f64 / n) + last * (i as f64 / n),
            })
            .collect::<Vec<_>>();

        BinEdges::validate(&edges).map_err(|_| BinSpecError::TooManyBinsForRange {
            num_bins: count,
            min,
            max,
        })?;
        Ok(BinEdges(edges))
    }
}

/// Ascending bin edges; `k + 1` edges describe `k` bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinEdges(Vec<f64>);

impl BinEdges {
    /// Wraps explicit edges, checking that there are at least two, all are
    /// finite and they are strictly ascending.
    pub fn new(edges: Vec<f64>) -> Result<Self, BinSpecError> {
        Self::validate(&edges)?;
        Ok(Self(edges))
    }

    fn validate(edges: &[f64]) -> Result<(), BinSpecError> {
        if edges.len() < 2 {
            return Err(BinSpecError::TooFewEdges { len: edges.len() });
        }
        if let Some((index, &value)) = edges.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(BinSpecError::NonFiniteEdge { index, value });
        }
        if let Some(index) = edges.windows(2).position(|w| w[0] >= w[1]) {
            return Err(BinSpecError::EdgesNotAscending {
                index: index + 1,
                value: edges[index + 1],
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.0.len() - 1
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Returns the `[lower, upper]` boundaries of bin `index`.
    #[must_use]
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        (self.0[index], self.0[index + 1])
    }

    /// Returns the midpoint of every bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use visdata_stats::binning::BinEdges;
    ///
    /// let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
    /// assert_eq!(edges.centers(), vec![5.0, 15.0]);
    /// ```
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        self.0.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Finds the bin containing `value` by binary search over the edges.
    ///
    /// Returns `None` for values outside `[first, last]` and for NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use visdata_stats::binning::BinEdges;
    ///
    /// let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
    /// assert_eq!(edges.which_bin(0.0), Some(0));
    /// assert_eq!(edges.which_bin(10.0), Some(1)); // lower edge of bin 1
    /// assert_eq!(edges.which_bin(20.0), Some(1)); // last bin is closed
    /// assert_eq!(edges.which_bin(20.5), None);
    /// assert_eq!(edges.which_bin(f64::NAN), None);
    /// ```
    #[must_use]
    pub fn which_bin(&self, value: f64) -> Option<usize> {
        let last = self.last();
        if !(self.first() <= value && value <= last) {
            return None;
        }
        if value == last {
            return Some(self.num_bins() - 1);
        }
        // First edge strictly above `value`; the bin starts one edge before it.
        let upper = self.0.partition_point(|edge| *edge <= value);
        Some(upper - 1)
    }
}

impl fmt::Display for BinEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Partitions paired samples into bins by their x-value.
///
/// Implementations must agree on bin contents as multisets; only the order of
/// values within a bin may differ. Samples whose x-value lies in no bin are
/// dropped.
pub trait BinningStrategy {
    /// Returns one list of y-values per bin.
    ///
    /// `x` and `y` must have the same length.
    fn partition(&self, edges: &BinEdges, x: &[f64], y: &[f64]) -> Vec<Vec<f64>>;
}

/// Selects samples bin by bin with a range mask over the whole data set.
///
/// Values within a bin keep their original order, except that samples sitting
/// exactly on the maximum edge are appended to the last bin after the
/// half-open selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vectorized;

impl BinningStrategy for Vectorized {
    fn partition(&self, edges: &BinEdges, x: &[f64], y: &[f64]) -> Vec<Vec<f64>> {
        assert_eq!(x.len(), y.len(), "x and y must have the same length");

        let select = |lower: f64, upper: f64| {
            x.iter()
                .zip(y)
                .filter(move |(xv, _)| lower <= **xv && **xv < upper)
                .map(|(_, yv)| *yv)
        };

        let mut bins = edges
            .as_slice()
            .windows(2)
            .map(|w| select(w[0], w[1]).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        // Rightmost bin is closed, not half-open
        let last_edge = edges.last();
        if let Some(last_bin) = bins.last_mut() {
            last_bin.extend(
                x.iter()
                    .zip(y)
                    .filter(|(xv, _)| **xv == last_edge)
                    .map(|(_, yv)| *yv),
            );
        }
        bins
    }
}

/// Walks the samples once, locating each sample's bin with [`BinEdges::which_bin`].
///
/// Values within a bin are in encounter order. This is the straightforward
/// reference implementation the other strategies are checked against.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerSample;

impl BinningStrategy for PerSample {
    fn partition(&self, edges: &BinEdges, x: &[f64], y: &[f64]) -> Vec<Vec<f64>> {
        assert_eq!(x.len(), y.len(), "x and y must have the same length");

        let mut bins = vec![Vec::new(); edges.num_bins()];
        for (&xv, &yv) in x.iter().zip(y) {
            if let Some(index) = edges.which_bin(xv) {
                bins[index].push(yv);
            }
        }
        bins
    }
}

/// Named selection of a [`BinningStrategy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinningStrategyKind {
    #[default]
    Vectorized,
    PerSample,
}

impl BinningStrategyKind {
    pub const ALL: [Self; 2] = [Self::Vectorized, Self::PerSample];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Vectorized => "vectorized",
            Self::PerSample => "per-sample",
        }
    }

    #[must_use]
    pub fn strategy(self) -> &'static dyn BinningStrategy {
        match self {
            Self::Vectorized => &Vectorized,
            Self::PerSample => &PerSample,
        }
    }

    #[must_use]
    pub fn partition(self, edges: &BinEdges, x: &[f64], y: &[f64]) -> Vec<Vec<f64>> {
        self.strategy().partition(edges, x, y)
    }
}

impl fmt::Display for BinningStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown binning strategy '{name}' (expected 'vectorized' or 'per-sample')")]
pub struct UnknownStrategyError {
    pub name: String,
}

impl FromStr for BinningStrategyKind {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vectorized" | "vectorised" => Ok(Self::Vectorized),
            "per-sample" | "per_sample" | "persample" => Ok(Self::PerSample),
            _ => Err(UnknownStrategyError {
                name: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sorted(mut values: Vec<f64>) -> Vec<f64> {
        values.sort_by(f64::total_cmp);
        values
    }

    #[test]
    fn test_count_edges_span_data_range() {
        let edges = BinSpec::Count(3)
            .edges(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        let slice = edges.as_slice();
        assert_eq!(slice.len(), 4);
        assert_eq!(slice[0], 0.0);
        assert!((slice[1] - 5.0 / 3.0).abs() < 1e-12);
        assert!((slice[2] - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(slice[3], 5.0);
    }

    #[test]
    fn test_count_edges_ignore_sample_order() {
        let a = BinSpec::Count(5).edges(&[3.0, -1.0, 7.0]).unwrap();
        let b = BinSpec::Count(5).edges(&[7.0, 3.0, -1.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), -1.0);
        assert_eq!(a.last(), 7.0);
    }

    #[rstest]
    #[case::zero_count(BinSpec::Count(0), BinSpecError::ZeroBinCount)]
    #[case::no_edges(BinSpec::Edges(vec![]), BinSpecError::TooFewEdges { len: 0 })]
    #[case::one_edge(BinSpec::Edges(vec![1.0]), BinSpecError::TooFewEdges { len: 1 })]
    #[case::descending(
        BinSpec::Edges(vec![0.0, 2.0, 1.0]),
        BinSpecError::EdgesNotAscending { index: 2, value: 1.0 }
    )]
    #[case::repeated(
        BinSpec::Edges(vec![0.0, 1.0, 1.0]),
        BinSpecError::EdgesNotAscending { index: 2, value: 1.0 }
    )]
    #[case::infinite(
        BinSpec::Edges(vec![0.0, f64::INFINITY]),
        BinSpecError::NonFiniteEdge { index: 1, value: f64::INFINITY }
    )]
    fn test_invalid_specs(#[case] spec: BinSpec, #[case] expected: BinSpecError) {
        assert_eq!(spec.validate(), Err(expected.clone()));
        assert_eq!(spec.edges(&[0.5]), Err(expected));
    }

    #[test]
    fn test_count_edges_reject_empty_and_non_finite_data() {
        assert_eq!(BinSpec::Count(2).edges(&[]), Err(BinSpecError::EmptyData));
        assert!(matches!(
            BinSpec::Count(2).edges(&[0.0, f64::NAN]),
            Err(BinSpecError::NonFiniteRange { .. })
        ));
    }

    #[rstest]
    #[case::full_float_range(&[-1e308, 1e308], 2)]
    #[case::near_max(&[f64::MAX, -f64::MAX, 0.0], 7)]
    #[case::tiny_range(&[1.0, 1.0 + 1e-9], 5)]
    fn test_count_edges_are_valid_for_extreme_ranges(
        #[case] values: &[f64],
        #[case] count: usize,
    ) {
        let edges = BinSpec::Count(count).edges(values).unwrap();
        assert_eq!(edges.num_bins(), count);
        assert!(BinEdges::new(edges.as_slice().to_vec()).is_ok());
        for &value in values {
            assert!(edges.which_bin(value).is_some(), "{value} in {edges}");
        }
    }

    #[rstest]
    #[case::collapsed_edges(&[1e16, 1e16 + 2.0], 4)]
    #[case::degenerate_at_large_magnitude(&[1e17, 1e17], 3)]
    fn test_count_edges_reject_ranges_too_narrow(
        #[case] values: &[f64],
        #[case] count: usize,
    ) {
        let err = BinSpec::Count(count).edges(values).unwrap_err();
        let BinSpecError::TooManyBinsForRange { num_bins, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(num_bins, count);
    }

    #[rstest]
    #[case(0.0, Some(0))]
    #[case(9.999, Some(0))]
    #[case(10.0, Some(1))]
    #[case(19.999, Some(1))]
    #[case(20.0, Some(2))]
    #[case(30.0, Some(2))]
    #[case(-0.001, None)]
    #[case(30.001, None)]
    #[case(f64::NEG_INFINITY, None)]
    fn test_which_bin_boundaries(#[case] value: f64, #[case] expected: Option<usize>) {
        let edges = BinEdges::new(vec![0.0, 10.0, 20.0, 30.0]).unwrap();
        assert_eq!(edges.which_bin(value), expected);
        if let Some(index) = expected {
            let (lower, upper) = edges.bounds(index);
            assert!(lower <= value && value <= upper);
        }
    }

    #[test]
    fn test_closed_last_bin_scenario() {
        let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
        let x = [0.0, 10.0, 20.0];
        let y = [5.0, 15.0, 25.0];
        for kind in BinningStrategyKind::ALL {
            let bins = kind.partition(&edges, &x, &y);
            assert_eq!(bins[0], vec![5.0], "{kind}");
            assert_eq!(sorted(bins[1].clone()), vec![15.0, 25.0], "{kind}");
        }
    }

    #[test]
    fn test_out_of_range_samples_are_dropped() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
        let x = [-1.0, 0.5, 1.5, 2.5, f64::NAN];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        for kind in BinningStrategyKind::ALL {
            assert_eq!(kind.partition(&edges, &x, &y), vec![vec![2.0], vec![3.0]]);
        }
    }

    #[test]
    fn test_strategies_differ_only_in_order() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
        let x = [2.0, 1.5, 0.0, 2.0, 1.0];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];

        let vectorized = Vectorized.partition(&edges, &x, &y);
        let per_sample = PerSample.partition(&edges, &x, &y);
        assert_eq!(vectorized, vec![vec![3.0], vec![2.0, 5.0, 1.0, 4.0]]);
        assert_eq!(per_sample, vec![vec![3.0], vec![1.0, 2.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_degenerate_range_keeps_all_samples() {
        let x = [4.0; 5];
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let edges = BinSpec::Count(3).edges(&x).unwrap();
        for kind in BinningStrategyKind::ALL {
            let bins = kind.partition(&edges, &x, &y);
            let total = bins.iter().map(Vec::len).sum::<usize>();
            assert_eq!(total, 5, "{kind}");
        }
    }

    #[rstest]
    #[case("vectorized", BinningStrategyKind::Vectorized)]
    #[case("Per-Sample", BinningStrategyKind::PerSample)]
    #[case("per_sample", BinningStrategyKind::PerSample)]
    fn test_parse_strategy(#[case] name: &str, #[case] expected: BinningStrategyKind) {
        assert_eq!(name.parse::<BinningStrategyKind>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown_strategy() {
        assert!("bogus".parse::<BinningStrategyKind>().is_err());
    }
}
