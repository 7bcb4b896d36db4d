use serde::Serialize;
use visdata_stats::{
    binning::{BinEdges, BinSpec},
    histogram::Histogram,
};

use crate::{InvalidArgument, Profile2d, ProfileOptions, error::check_samples};

/// Joint frequency counts of paired samples over an x- and a y-binning.
///
/// Both axes follow the usual boundary rules: half-open bins, the last bin
/// closed at the maximum edge.
///
/// # Examples
///
/// ```
/// use visdata_profile::Histogram2d;
/// use visdata_stats::binning::BinSpec;
///
/// let x = [0.0, 0.0, 1.0, 2.0];
/// let y = [0.0, 2.0, 2.0, 2.0];
/// let histogram = Histogram2d::new(&x, &y, BinSpec::Count(2), BinSpec::Count(2)).unwrap();
///
/// assert_eq!(histogram.counts(), &[vec![1, 1], vec![0, 2]]);
/// assert_eq!(histogram.x_marginal().counts(), vec![2, 2]);
/// assert_eq!(histogram.y_marginal().counts(), vec![1, 3]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Histogram2d {
    x_edges: BinEdges,
    y_edges: BinEdges,
    /// `counts[ix][iy]`
    counts: Vec<Vec<u64>>,
    outside: u64,
    #[serde(skip)]
    x: Vec<f64>,
    #[serde(skip)]
    y: Vec<f64>,
}

impl Histogram2d {
    pub fn new<BX, BY>(
        x: &[f64],
        y: &[f64],
        x_bins: BX,
        y_bins: BY,
    ) -> Result<Self, InvalidArgument>
    where
        BX: Into<BinSpec>,
        BY: Into<BinSpec>,
    {
        check_samples(x, y)?;
        let x_edges = x_bins.into().edges(x)?;
        let y_edges = y_bins.into().edges(y)?;

        let mut counts = vec![vec![0; y_edges.num_bins()]; x_edges.num_bins()];
        let mut outside = 0;
        for (&xv, &yv) in x.iter().zip(y) {
            match (x_edges.which_bin(xv), y_edges.which_bin(yv)) {
                (Some(ix), Some(iy)) => counts[ix][iy] += 1,
                _ => outside += 1,
            }
        }

        Ok(Self {
            x_edges,
            y_edges,
            counts,
            outside,
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }

    #[must_use]
    pub fn x_edges(&self) -> &BinEdges {
        &self.x_edges
    }

    #[must_use]
    pub fn y_edges(&self) -> &BinEdges {
        &self.y_edges
    }

    #[must_use]
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Number of samples outside the x- or y-binning.
    #[must_use]
    pub fn outside(&self) -> u64 {
        self.outside
    }

    /// Histogram of all x-values over the x-binning.
    #[must_use]
    pub fn x_marginal(&self) -> Histogram {
        Histogram::with_edges(&self.x, &self.x_edges)
    }

    /// Histogram of all y-values over the y-binning.
    #[must_use]
    pub fn y_marginal(&self) -> Histogram {
        Histogram::with_edges(&self.y, &self.y_edges)
    }

    /// Profile of the same samples over the x-binning.
    #[must_use]
    pub fn profile(&self, options: ProfileOptions) -> Profile2d {
        Profile2d::from_edges(&self.x, &self.y, self.x_edges.clone(), options.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_samples() {
        let x = [0.1, 0.4, 0.4, 0.9, 1.0, 0.0];
        let y = [5.0, 3.0, 1.0, 2.0, 4.0, 0.0];
        let histogram = Histogram2d::new(&x, &y, BinSpec::Count(3), BinSpec::Count(4)).unwrap();
        let total = histogram.counts().iter().flatten().sum::<u64>();
        assert_eq!(total, 6);
        assert_eq!(histogram.outside(), 0);
        assert_eq!(histogram.counts().len(), 3);
        assert!(histogram.counts().iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_marginals_include_samples_outside_other_axis() {
        let x = [0.5, 1.5, 1.5];
        let y = [0.5, 0.5, 9.0];
        let histogram = Histogram2d::new(
            &x,
            &y,
            BinSpec::Edges(vec![0.0, 1.0, 2.0]),
            BinSpec::Edges(vec![0.0, 1.0]),
        )
        .unwrap();
        assert_eq!(histogram.counts(), &[vec![1], vec![1]]);
        assert_eq!(histogram.outside(), 1);
        assert_eq!(histogram.x_marginal().counts(), vec![1, 2]);
        assert_eq!(histogram.y_marginal().outside, 1);
    }

    #[test]
    fn test_profile_uses_x_binning() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let histogram = Histogram2d::new(&x, &y, BinSpec::Count(3), BinSpec::Count(2)).unwrap();
        let profile = histogram.profile(ProfileOptions::default());
        assert_eq!(profile.bin_edges(), histogram.x_edges().as_slice());
        assert_eq!(profile.bin_means(), &[0.5, 2.5, 4.5]);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            Histogram2d::new(&[1.0], &[], BinSpec::Count(1), BinSpec::Count(1)).unwrap_err(),
            InvalidArgument::LengthMismatch { x_len: 1, y_len: 0 }
        );
    }
}
