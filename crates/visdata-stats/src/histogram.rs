use serde::Serialize;

use crate::binning::{BinEdges, BinSpec, BinSpecError};

/// A histogram representation of a dataset's distribution.
///
/// Values are counted with the same boundary rules as every other binning in
/// this crate: half-open bins, with the last bin closed at the maximum edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
    /// The number of values that fall outside every bin (including NaN).
    pub outside: u64,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower boundary.
    pub start: f64,
    /// Upper boundary; exclusive except for the last bin.
    pub end: f64,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram of `values` over the bins described by `spec`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visdata_stats::{binning::BinSpec, histogram::Histogram};
    /// let values = [1.0, 2.0, 2.0, 3.0, 4.0];
    /// let histogram = Histogram::new(&values, &BinSpec::Count(3)).unwrap();
    /// assert_eq!(histogram.counts(), vec![1, 2, 2]);
    /// ```
    pub fn new(values: &[f64], spec: &BinSpec) -> Result<Self, BinSpecError> {
        let edges = spec.edges(values)?;
        Ok(Self::with_edges(values, &edges))
    }

    /// Creates a histogram of `values` over already resolved edges.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visdata_stats::{binning::BinEdges, histogram::Histogram};
    /// let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
    /// let histogram = Histogram::with_edges(&[-5.0, 0.0, 10.0, 20.0, 25.0], &edges);
    /// assert_eq!(histogram.counts(), vec![1, 2]);
    /// assert_eq!(histogram.outside, 2);
    /// ```
    #[must_use]
    pub fn with_edges(values: &[f64], edges: &BinEdges) -> Self {
        let mut bins = edges
            .as_slice()
            .windows(2)
            .map(|w| HistogramBin {
                start: w[0],
                end: w[1],
                count: 0,
            })
            .collect::<Vec<_>>();

        let mut outside = 0;
        for &value in values {
            match edges.which_bin(value) {
                Some(idx) => bins[idx].count += 1,
                None => outside += 1,
            }
        }

        Self { bins, outside }
    }

    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Total number of values counted in some bin.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_every_value_once() {
        let values = [0.3, 0.1, 0.9, 0.5, 0.5, 1.0, 0.0];
        let histogram = Histogram::new(&values, &BinSpec::Count(4)).unwrap();
        assert_eq!(histogram.total(), values.len() as u64);
        assert_eq!(histogram.outside, 0);
    }

    #[test]
    fn test_bin_ranges_follow_edges() {
        let histogram = Histogram::new(&[1.0, 3.0], &BinSpec::Edges(vec![0.0, 2.0, 4.0])).unwrap();
        assert_eq!(
            histogram.bins,
            vec![
                HistogramBin {
                    start: 0.0,
                    end: 2.0,
                    count: 1
                },
                HistogramBin {
                    start: 2.0,
                    end: 4.0,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        assert_eq!(
            Histogram::new(&[1.0], &BinSpec::Count(0)),
            Err(BinSpecError::ZeroBinCount)
        );
    }
}
