use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use visdata_profile::ProfileOptions;
use visdata_stats::binning::{BinSpec, BinningStrategyKind};

use crate::schema::samples::Samples;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Where to find the x and y columns of a CSV file
#[derive(Debug, Clone, clap::Args)]
pub struct InputArg {
    /// Path to the samples file (`.json` with `x`/`y` arrays, or `.csv`)
    pub input: PathBuf,

    /// CSV column holding the independent variable
    #[arg(long, default_value = "x")]
    pub x_column: String,

    /// CSV column holding the dependent variable
    #[arg(long, default_value = "y")]
    pub y_column: String,

    /// The CSV file has no header row; use the first two columns
    #[arg(long)]
    pub no_header: bool,
}

impl InputArg {
    /// Read paired samples, choosing the format by file extension
    pub fn read_samples(&self) -> anyhow::Result<Samples> {
        let is_csv = self
            .input
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let samples = if is_csv {
            self.read_csv()?
        } else {
            read_json_file::<Samples, _>("samples", &self.input)?
        };
        eprintln!(
            "Loaded {} samples from {}",
            samples.x.len(),
            self.input.display()
        );
        Ok(samples)
    }

    fn read_csv(&self) -> anyhow::Result<Samples> {
        let path = &self.input;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(!self.no_header)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open samples file: {}", path.display()))?;

        let (x_idx, y_idx) = if self.no_header {
            (0, 1)
        } else {
            let headers = reader
                .headers()
                .with_context(|| format!("Failed to read CSV header: {}", path.display()))?;
            let find = |name: &str| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .with_context(|| format!("Column '{name}' not found in {}", path.display()))
            };
            (find(&self.x_column)?, find(&self.y_column)?)
        };

        let mut samples = Samples::default();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Failed to read CSV row {row}: {}", path.display()))?;
            let field = |idx: usize| -> anyhow::Result<f64> {
                let text = record
                    .get(idx)
                    .with_context(|| format!("Row {row} has no column {idx}"))?;
                text.parse()
                    .with_context(|| format!("Row {row}: '{text}' is not a number"))
            };
            samples.x.push(field(x_idx)?);
            samples.y.push(field(y_idx)?);
        }
        Ok(samples)
    }
}

/// Bin specification shared by the subcommands
#[derive(Debug, Clone, clap::Args)]
pub struct BinArg {
    /// Number of equal-width bins spanning the data range
    #[arg(long, default_value_t = 10, conflicts_with = "edges")]
    pub bins: usize,

    /// Explicit bin edges (comma-separated, strictly ascending)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub edges: Option<Vec<f64>>,
}

impl BinArg {
    /// The bin specification, checked before any data is read.
    pub fn spec(&self) -> anyhow::Result<BinSpec> {
        let spec = match &self.edges {
            Some(edges) => BinSpec::Edges(edges.clone()),
            None => BinSpec::Count(self.bins),
        };
        spec.validate().context("Invalid bin specification")?;
        Ok(spec)
    }
}

/// Profile construction options
#[derive(Debug, Clone, clap::Args)]
pub struct ProfileOptionsArg {
    /// Binning strategy (`vectorized` or `per-sample`)
    #[arg(long)]
    pub strategy: Option<BinningStrategyKind>,

    /// Construction keyword, as `key=value` (repeatable)
    #[arg(long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

impl ProfileOptionsArg {
    /// Keywords are applied in order, then `--strategy` overrides them.
    pub fn options(&self) -> anyhow::Result<ProfileOptions> {
        let keywords = self
            .options
            .iter()
            .map(|option| {
                option
                    .split_once('=')
                    .with_context(|| format!("Option '{option}' is not of the form key=value"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut options = ProfileOptions::from_keywords(keywords)
            .context("Invalid profile construction option")?;
        if let Some(strategy) = self.strategy {
            options.strategy = strategy;
        }
        Ok(options)
    }
}
