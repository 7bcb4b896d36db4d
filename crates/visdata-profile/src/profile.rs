use serde::Serialize;
use visdata_stats::{
    binning::{BinEdges, BinSpec, BinningStrategyKind},
    descriptive::DescriptiveStats,
};

use crate::{
    InvalidArgument, ProfileOptions,
    error::check_samples,
    plot::{self, PlotConfig, PlotSurface, ProfileColumns},
};

/// Per-bin statistics of a dependent variable `y` binned by an independent
/// variable `x`.
///
/// Binning and statistics are computed once at construction; the result is
/// read-only. Bins without samples report NaN for every statistic, and bins
/// with a single sample report NaN for `std` and `sem`.
///
/// # Examples
///
/// ```
/// use visdata_profile::Profile2d;
/// use visdata_stats::binning::BinSpec;
///
/// let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let profile = Profile2d::new(&x, &y, BinSpec::Count(3)).unwrap();
///
/// assert_eq!(profile.bin_means(), &[0.5, 2.5, 4.5]);
/// assert_eq!(profile.bin_counts(), vec![2, 2, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Profile2d {
    strategy: BinningStrategyKind,
    edges: BinEdges,
    centers: Vec<f64>,
    bin_data: Vec<Vec<f64>>,
    stats: Vec<DescriptiveStats>,
    means: Vec<f64>,
    medians: Vec<f64>,
    stds: Vec<f64>,
    sems: Vec<f64>,
    outside_count: usize,
}

/// One row of the statistics table of a [`Profile2d`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileRow {
    pub lower: f64,
    pub upper: f64,
    pub center: f64,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub sem: f64,
    pub median: f64,
}

impl Profile2d {
    /// Builds a profile with the default options.
    pub fn new<B>(x: &[f64], y: &[f64], bins: B) -> Result<Self, InvalidArgument>
    where
        B: Into<BinSpec>,
    {
        Self::with_options(x, y, bins, ProfileOptions::default())
    }

    /// Builds a profile of `y` over bins of `x`.
    ///
    /// Fails if `x` and `y` differ in length, are empty, or if `bins` is not a
    /// valid bin specification. With explicit edges, samples whose `x` lies
    /// outside the edges are not part of any bin (see
    /// [`outside_count`](Self::outside_count)).
    pub fn with_options<B>(
        x: &[f64],
        y: &[f64],
        bins: B,
        options: ProfileOptions,
    ) -> Result<Self, InvalidArgument>
    where
        B: Into<BinSpec>,
    {
        check_samples(x, y)?;
        let edges = bins.into().edges(x)?;
        Ok(Self::from_edges(x, y, edges, options.strategy))
    }

    pub(crate) fn from_edges(
        x: &[f64],
        y: &[f64],
        edges: BinEdges,
        strategy: BinningStrategyKind,
    ) -> Self {
        let bin_data = strategy.partition(&edges, x, y);
        let stats = bin_data
            .iter()
            .map(|values| DescriptiveStats::new(values.iter().copied()))
            .collect::<Vec<_>>();
        let binned = stats.iter().map(|s| s.count).sum::<usize>();
        let outside_count = x.len() - binned;

        tracing::debug!(
            num_bins = edges.num_bins(),
            %strategy,
            samples = x.len(),
            outside = outside_count,
            "binned profile data"
        );

        let column = |f: fn(&DescriptiveStats) -> f64| stats.iter().map(f).collect::<Vec<_>>();
        Self {
            strategy,
            centers: edges.centers(),
            means: column(|s| s.mean),
            medians: column(|s| s.median),
            stds: column(|s| s.std),
            sems: column(|s| s.sem),
            edges,
            bin_data,
            stats,
            outside_count,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> BinningStrategyKind {
        self.strategy
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.num_bins()
    }

    #[must_use]
    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    #[must_use]
    pub fn bin_edges(&self) -> &[f64] {
        self.edges.as_slice()
    }

    #[must_use]
    pub fn bin_centers(&self) -> &[f64] {
        &self.centers
    }

    /// The y-values of each bin.
    ///
    /// Within a bin, the order of values depends on the binning strategy.
    #[must_use]
    pub fn bin_data(&self) -> &[Vec<f64>] {
        &self.bin_data
    }

    #[must_use]
    pub fn bin_stats(&self) -> &[DescriptiveStats] {
        &self.stats
    }

    #[must_use]
    pub fn bin_counts(&self) -> Vec<usize> {
        self.stats.iter().map(|s| s.count).collect()
    }

    #[must_use]
    pub fn bin_means(&self) -> &[f64] {
        &self.means
    }

    #[must_use]
    pub fn bin_medians(&self) -> &[f64] {
        &self.medians
    }

    #[must_use]
    pub fn bin_stds(&self) -> &[f64] {
        &self.stds
    }

    #[must_use]
    pub fn bin_sems(&self) -> &[f64] {
        &self.sems
    }

    /// Number of samples that fell into no bin.
    #[must_use]
    pub fn outside_count(&self) -> usize {
        self.outside_count
    }

    /// Returns the statistics table, one row per bin.
    #[must_use]
    pub fn rows(&self) -> Vec<ProfileRow> {
        self.stats
            .iter()
            .enumerate()
            .map(|(idx, stats)| {
                let (lower, upper) = self.edges.bounds(idx);
                ProfileRow {
                    lower,
                    upper,
                    center: self.centers[idx],
                    count: stats.count,
                    mean: stats.mean,
                    std: stats.std,
                    sem: stats.sem,
                    median: stats.median,
                }
            })
            .collect()
    }

    /// Returns whether both profiles put the same values into the same bins,
    /// ignoring the order of values within a bin.
    #[must_use]
    pub fn same_membership(&self, other: &Self) -> bool {
        fn sorted(values: &[f64]) -> Vec<f64> {
            let mut values = values.to_vec();
            values.sort_by(f64::total_cmp);
            values
        }
        self.edges == other.edges
            && self.bin_data.len() == other.bin_data.len()
            && self
                .bin_data
                .iter()
                .zip(&other.bin_data)
                .all(|(a, b)| {
                    let (a, b) = (sorted(a), sorted(b));
                    a.len() == b.len() && a.iter().zip(&b).all(|(a, b)| a.total_cmp(b).is_eq())
                })
    }

    /// Returns whether both profiles report identical statistics, treating NaN
    /// as equal to NaN.
    #[must_use]
    pub fn same_statistics(&self, other: &Self) -> bool {
        let same = |a: &[f64], b: &[f64]| {
            a.len() == b.len()
                && a
                    .iter()
                    .zip(b)
                    .all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
        };
        same(&self.centers, &other.centers)
            && same(&self.means, &other.means)
            && same(&self.medians, &other.medians)
            && same(&self.stds, &other.stds)
            && same(&self.sems, &other.sems)
    }

    /// The statistics columns handed to a drawing surface.
    #[must_use]
    pub fn columns(&self) -> ProfileColumns<'_> {
        ProfileColumns {
            centers: &self.centers,
            mean: &self.means,
            median: &self.medians,
            std: &self.stds,
            sem: &self.sems,
        }
    }

    /// Draws the profile onto `surface`, once per display configuration.
    ///
    /// Without configurations, draws the median without error bars followed by
    /// the mean with standard-error bars.
    pub fn add_to_surface<S>(
        &self,
        surface: &mut S,
        configs: &[PlotConfig],
    ) -> Result<(), InvalidArgument>
    where
        S: PlotSurface + ?Sized,
    {
        plot::add_columns_to_surface(surface, &self.columns(), configs)
    }
}
