use std::path::PathBuf;

use anyhow::Context;
use visdata_profile::{
    Profile2d,
    plot::{PlotConfig, RecordingSurface},
};

use crate::util::{self, BinArg, InputArg, Output, ProfileOptionsArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SeriesArg {
    #[clap(flatten)]
    input: InputArg,
    #[clap(flatten)]
    bins: BinArg,
    #[clap(flatten)]
    options: ProfileOptionsArg,
    /// JSON file holding an array of display configurations
    #[arg(long)]
    plot_config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SeriesArg) -> anyhow::Result<()> {
    let configs = match &arg.plot_config {
        Some(path) => util::read_json_file::<Vec<PlotConfig>, _>("plot config", path)?,
        None => vec![],
    };

    let spec = arg.bins.spec()?;
    let samples = arg.input.read_samples()?;
    let options = arg.options.options()?;
    let profile = Profile2d::with_options(&samples.x, &samples.y, spec, options)
        .context("Failed to build profile")?;

    let mut surface = RecordingSurface::default();
    profile
        .add_to_surface(&mut surface, &configs)
        .context("Failed to resolve display configuration")?;
    eprintln!("Recorded {} series", surface.series.len());

    Output::save_json(&surface, arg.output.clone())?;
    Ok(())
}
