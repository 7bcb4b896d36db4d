use anyhow::Context;
use visdata_profile::{Profile2d, ProfileOptions};
use visdata_stats::binning::BinningStrategyKind;

use crate::util::{BinArg, InputArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareStrategiesArg {
    #[clap(flatten)]
    input: InputArg,
    #[clap(flatten)]
    bins: BinArg,
}

pub(crate) fn run(arg: &CompareStrategiesArg) -> anyhow::Result<()> {
    let spec = arg.bins.spec()?;
    let samples = arg.input.read_samples()?;

    let profiles = BinningStrategyKind::ALL
        .iter()
        .map(|&strategy| {
            let profile = Profile2d::with_options(
                &samples.x,
                &samples.y,
                spec.clone(),
                ProfileOptions::with_strategy(strategy),
            )
            .with_context(|| format!("Failed to build profile with strategy {strategy}"))?;
            eprintln!(
                "{strategy}: {} bins, {} samples binned, {} outside",
                profile.num_bins(),
                profile.bin_counts().iter().sum::<usize>(),
                profile.outside_count()
            );
            Ok(profile)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let (reference, others) = profiles
        .split_first()
        .context("No binning strategy available")?;
    let mut agree = true;
    for other in others {
        let same_membership = reference.same_membership(other);
        let same_statistics = reference.same_statistics(other);
        println!(
            "{} vs {}: membership {}, statistics {}",
            reference.strategy(),
            other.strategy(),
            verdict(same_membership),
            verdict(same_statistics)
        );
        agree &= same_membership && same_statistics;
    }

    if !agree {
        anyhow::bail!("Binning strategies disagree");
    }
    Ok(())
}

fn verdict(same: bool) -> &'static str {
    if same { "agree" } else { "DIFFER" }
}
