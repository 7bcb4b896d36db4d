use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use visdata_profile::Histogram2d;
use visdata_stats::{binning::BinSpec, histogram::Histogram};

use crate::util::{InputArg, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct Histogram2dArg {
    #[clap(flatten)]
    input: InputArg,
    /// Number of bins along x
    #[arg(long, default_value_t = 20)]
    bins: usize,
    /// Number of bins along y (defaults to `--bins`)
    #[arg(long)]
    y_bins: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Histogram2dReport {
    #[serde(flatten)]
    histogram: Histogram2d,
    x_marginal: Histogram,
    y_marginal: Histogram,
}

pub(crate) fn run(arg: &Histogram2dArg) -> anyhow::Result<()> {
    let samples = arg.input.read_samples()?;
    let histogram = Histogram2d::new(
        &samples.x,
        &samples.y,
        BinSpec::Count(arg.bins),
        BinSpec::Count(arg.y_bins.unwrap_or(arg.bins)),
    )
    .context("Failed to build 2D histogram")?;

    let report = Histogram2dReport {
        x_marginal: histogram.x_marginal(),
        y_marginal: histogram.y_marginal(),
        histogram,
    };
    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
