//! Numeric building blocks for binned measurement data.
//!
//! This crate provides the statistical tools the profile and histogram types
//! are built from:
//!
//! - **Descriptive statistics**: count, mean, median, sample standard deviation
//!   and standard error of the mean, with NaN for undefined values
//! - **Binning**: Bin specifications, bin edges and the strategies that
//!   partition paired samples into bins
//! - **Histogram generation**: Frequency counts over a binning
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`binning`]: Bin edges and binning strategies
//! - [`histogram`]: Histogram construction for visualizing data distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use visdata_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0]);
//! assert_eq!(stats.mean, 2.0);
//! assert_eq!(stats.std, 1.0);
//! ```
//!
//! ## Partitioning paired samples
//!
//! ```
//! use visdata_stats::binning::{BinEdges, BinningStrategyKind};
//!
//! let edges = BinEdges::new(vec![0.0, 10.0, 20.0]).unwrap();
//! let bins = BinningStrategyKind::PerSample.partition(&edges, &[0.0, 10.0, 20.0], &[5.0, 15.0, 25.0]);
//! assert_eq!(bins, vec![vec![5.0], vec![15.0, 25.0]]);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use visdata_stats::{binning::BinSpec, histogram::Histogram};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(&values, &BinSpec::Count(5)).unwrap();
//! assert_eq!(histogram.counts(), vec![2, 2, 2, 2, 2]);
//! ```

pub mod binning;
pub mod descriptive;
pub mod histogram;
