use clap::{Parser, Subcommand};

use self::{
    compare_strategies::CompareStrategiesArg, generate::GenerateArg, histogram2d::Histogram2dArg,
    profile::ProfileArg, series::SeriesArg,
};

mod compare_strategies;
mod generate;
mod histogram2d;
mod profile;
mod series;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print per-bin statistics of y binned along x
    Profile(#[clap(flatten)] ProfileArg),
    /// Write the draw calls a profile produces for a set of display configurations
    Series(#[clap(flatten)] SeriesArg),
    /// Check that both binning strategies produce the same bins
    CompareStrategies(#[clap(flatten)] CompareStrategiesArg),
    /// Count samples on a 2D grid, with marginal histograms
    Histogram2d(#[clap(flatten)] Histogram2dArg),
    /// Write a demonstration data set
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Profile(arg) => profile::run(&arg)?,
        Mode::Series(arg) => series::run(&arg)?,
        Mode::CompareStrategies(arg) => compare_strategies::run(&arg)?,
        Mode::Histogram2d(arg) => histogram2d::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
