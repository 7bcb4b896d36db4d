use std::{f64::consts::TAU, path::PathBuf};

use anyhow::Context;
use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Normal, Uniform};
use rand_pcg::Pcg32;

use crate::{schema::samples::Samples, util::Output};

/// Points of the fixed data set pushed upward, as (index, offset = 500·index).
const DISPLACED: [(usize, f64); 3] = [(5, 2500.0), (55, 27_500.0), (75, 37_500.0)];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of random samples to generate
    #[arg(long, default_value_t = 1000)]
    num_samples: usize,
    /// Seed for the random generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Write the deterministic quadratic data set instead of random data
    #[arg(long)]
    fixed: bool,
    /// Restrict the fixed data set to positive x
    #[arg(long, requires = "fixed")]
    positive: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let samples = if arg.fixed {
        fixed_samples(arg.positive)
    } else {
        let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
        eprintln!("Generating {} samples with seed {seed}", arg.num_samples);
        let mut rng = Pcg32::seed_from_u64(seed);
        noisy_cosine_samples(arg.num_samples, &mut rng)?
    };
    Output::save_json(&samples, arg.output.clone())?;
    Ok(())
}

/// `x ~ U(0, 2π)`, `y = c + N(0, 0.1) + N(0, 0.2)·c` with `c = 0.05 cos x`.
fn noisy_cosine_samples<R>(num_samples: usize, rng: &mut R) -> anyhow::Result<Samples>
where
    R: Rng,
{
    let phase = Uniform::new(0.0, TAU).context("Invalid phase distribution")?;
    let offset = Normal::new(0.0, 0.1).context("Invalid offset distribution")?;
    let scale = Normal::new(0.0, 0.2).context("Invalid scale distribution")?;

    let mut samples = Samples::default();
    for _ in 0..num_samples {
        let x = phase.sample(rng);
        let curve = 0.05 * x.cos();
        let y = curve + offset.sample(rng) + scale.sample(rng) * curve;
        samples.x.push(x);
        samples.y.push(y);
    }
    Ok(samples)
}

/// A parabola over 200 evenly spaced points, with a few displaced points, a
/// sparse tail and two outliers at the far end.
fn fixed_samples(positive: bool) -> Samples {
    let (start, stop) = if positive { (1.0, 100.0) } else { (-100.0, 100.0) };
    let x = linspace(start, stop, 200);
    let mut y = x.iter().map(|v| v * v).collect::<Vec<_>>();
    for (idx, offset) in DISPLACED {
        y[idx] += offset;
    }

    let mut samples = Samples { x, y };
    for v in 140_i32..180 {
        let v = f64::from(v);
        samples.x.push(v);
        samples.y.push(v * v);
    }
    samples.x.extend([220.0, 220.0]);
    samples.y.extend([500.0, 10000.0]);
    samples
}

#[expect(clippy::cast_precision_loss)]
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    let step = (stop - start) / (num - 1) as f64;
    (0..num)
        .map(|i| if i + 1 == num { stop } else { start + step * i as f64 })
        .collect()
}
