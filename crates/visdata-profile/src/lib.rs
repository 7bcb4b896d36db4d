//! Binned profiles of two-dimensional measurement data
//!
//! Given paired samples `(x, y)`, a [`Profile2d`] partitions the y-values into
//! bins of x and summarizes every bin with its mean, median, sample standard
//! deviation and standard error of the mean. The result is handed to a
//! drawing backend through the [`plot::PlotSurface`] trait; nothing in this
//! crate draws.
//!
//! # Overview
//!
//! 1. **Bin specification** ([`visdata_stats::binning::BinSpec`]): a bin count
//!    spanning the observed x-range, or explicit edges
//! 2. **Options** ([`ProfileOptions`]): which binning strategy partitions the
//!    samples
//! 3. **Profile** ([`Profile2d`]): bin edges, bin centers, bin members and
//!    per-bin statistics, computed once at construction
//! 4. **Plot attachment** ([`plot`]): one draw request per display
//!    configuration
//!
//! [`Histogram2d`] counts the same samples on a two-dimensional grid, with
//! marginal histograms for each axis.
//!
//! # Undefined statistics
//!
//! Statistics that cannot be computed are `f64::NAN`: all of them for an empty
//! bin, `std` and `sem` for a bin with one sample. They are data, not errors.
//!
//! # Examples
//!
//! ```
//! use visdata_profile::{Profile2d, ProfileOptions};
//! use visdata_stats::binning::{BinSpec, BinningStrategyKind};
//!
//! let x = [0.0, 10.0, 20.0];
//! let y = [5.0, 15.0, 25.0];
//! let options = ProfileOptions::with_strategy(BinningStrategyKind::PerSample);
//! let profile =
//!     Profile2d::with_options(&x, &y, BinSpec::Edges(vec![0.0, 10.0, 20.0]), options).unwrap();
//!
//! // the last bin is closed, so x = 20 is included
//! assert_eq!(profile.bin_means(), &[5.0, 20.0]);
//! assert!(profile.bin_stds()[0].is_nan());
//! ```

pub use self::{
    error::InvalidArgument,
    histogram2d::Histogram2d,
    options::ProfileOptions,
    profile::{Profile2d, ProfileRow},
};

mod error;
mod histogram2d;
mod options;
pub mod plot;
mod profile;
