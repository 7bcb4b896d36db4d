use std::path::PathBuf;

use anyhow::Context;
use visdata_profile::{Profile2d, ProfileRow};

use crate::util::{BinArg, InputArg, Output, ProfileOptionsArg};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    /// Aligned text table
    #[default]
    Table,
    /// JSON array of rows, undefined statistics as `null`
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    #[clap(flatten)]
    pub(crate) input: InputArg,
    #[clap(flatten)]
    pub(crate) bins: BinArg,
    #[clap(flatten)]
    pub(crate) options: ProfileOptionsArg,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: Format,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProfileArg) -> anyhow::Result<()> {
    let spec = arg.bins.spec()?;
    let samples = arg.input.read_samples()?;
    let options = arg.options.options()?;
    let profile = Profile2d::with_options(&samples.x, &samples.y, spec, options)
        .context("Failed to build profile")?;
    if profile.outside_count() > 0 {
        eprintln!(
            "{} samples fall outside the bin edges {} and were skipped",
            profile.outside_count(),
            profile.edges()
        );
    }

    let rows = profile.rows();
    match arg.format {
        Format::Json => Output::save_json(&rows, arg.output.clone())?,
        Format::Table => {
            let mut output = Output::from_output_path(arg.output.clone())?;
            write_table(&mut output, &rows)
                .with_context(|| format!("Failed to write table to {}", output.display_path()))?;
        }
    }
    Ok(())
}

const HEADERS: [&str; 8] = [
    "lower", "upper", "center", "count", "mean", "std", "sem", "median",
];

fn write_table<W>(writer: &mut W, rows: &[ProfileRow]) -> std::io::Result<()>
where
    W: std::io::Write,
{
    let cells = rows
        .iter()
        .map(|row| {
            [
                format_value(row.lower),
                format_value(row.upper),
                format_value(row.center),
                row.count.to_string(),
                format_value(row.mean),
                format_value(row.std),
                format_value(row.sem),
                format_value(row.median),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for (header, width) in HEADERS.iter().zip(widths) {
        write!(writer, "{header:>width$}  ")?;
    }
    writeln!(writer)?;
    for row in &cells {
        for (cell, width) in row.iter().zip(widths) {
            write!(writer, "{cell:>width$}  ")?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_owned()
    } else {
        format!("{value:.6}")
    }
}
