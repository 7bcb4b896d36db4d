//! Handing profile statistics to a drawing surface
//!
//! This crate does not draw. A [`PlotSurface`] receives one [`ProfileSeries`]
//! per display configuration: the bin centers, the selected statistic, the
//! selected error column (if any) and the style attributes of the
//! configuration, passed through unchanged.
//!
//! # Examples
//!
//! ```
//! use visdata_profile::{
//!     Profile2d,
//!     plot::{Mark, PlotConfig, RecordingSurface},
//! };
//! use visdata_stats::binning::BinSpec;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 2.0, 3.0, 4.0];
//! let profile = Profile2d::new(&x, &y, BinSpec::Count(2)).unwrap();
//!
//! let mut surface = RecordingSurface::default();
//! profile
//!     .add_to_surface(&mut surface, &[PlotConfig::median().with_yerr("std")])
//!     .unwrap();
//!
//! assert_eq!(surface.series.len(), 1);
//! assert_eq!(surface.series[0].mark, Mark::ErrorBar);
//! assert_eq!(surface.series[0].y, profile.bin_medians());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InvalidArgument;

/// A per-bin statistic of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    Median,
    Std,
    Sem,
}

/// The central value drawn for each bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Mean,
    Median,
}

/// The statistic drawn as vertical error bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Sem,
    Std,
}

const QUANTITY_NAMES: &[(&str, Quantity)] = &[
    ("mean", Quantity::Mean),
    ("median", Quantity::Median),
];

const ERROR_KIND_NAMES: &[(&str, Option<ErrorKind>)] = &[
    ("sem", Some(ErrorKind::Sem)),
    ("standard error on the mean", Some(ErrorKind::Sem)),
    ("std", Some(ErrorKind::Std)),
    ("standard deviation", Some(ErrorKind::Std)),
    ("none", None),
    ("0", None),
    ("false", None),
    ("", None),
];

impl Quantity {
    /// Looks up a quantity by name.
    pub fn from_name(name: &str) -> Result<Self, InvalidArgument> {
        QUANTITY_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, quantity)| *quantity)
            .ok_or_else(|| InvalidArgument::UnknownQuantity {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
        }
    }

    #[must_use]
    pub fn statistic(self) -> Statistic {
        match self {
            Self::Mean => Statistic::Mean,
            Self::Median => Statistic::Median,
        }
    }
}

impl ErrorKind {
    /// Looks up an error kind by name; names meaning "no error bars" yield
    /// `None`.
    pub fn from_name(name: &str) -> Result<Option<Self>, InvalidArgument> {
        ERROR_KIND_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| InvalidArgument::UnknownErrorKind {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sem => "sem",
            Self::Std => "std",
        }
    }

    #[must_use]
    pub fn statistic(self) -> Statistic {
        match self {
            Self::Sem => Statistic::Sem,
            Self::Std => Statistic::Std,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style attributes of a drawn series. Never interpreted here.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markersize: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capsize: Option<f64>,
}

/// A display configuration: which statistic to draw, with which error bars and
/// how.
///
/// Quantity and error kind are kept as names and resolved when the
/// configuration is drawn, so configurations loaded from files are validated
/// in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// `mean` or `median`.
    pub quantity: String,
    /// `sem`, `std` (or their long names), or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yerr: Option<String>,
    /// Constant horizontal error passed through to the surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xerr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub style: PlotStyle,
}

impl PlotConfig {
    /// A configuration with no error bars and no style.
    #[must_use]
    pub fn new(quantity: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            yerr: None,
            xerr: None,
            label: None,
            style: PlotStyle::default(),
        }
    }

    /// Mean with standard-error bars, drawn as small red points.
    #[must_use]
    pub fn mean() -> Self {
        Self {
            yerr: Some(ErrorKind::Sem.name().to_owned()),
            style: PlotStyle {
                color: Some("r".to_owned()),
                marker: Some(".".to_owned()),
                markersize: Some(5.0),
                linewidth: Some(1.0),
                capsize: Some(2.0),
            },
            ..Self::new(Quantity::Mean.name())
        }
    }

    /// Median without error bars, drawn as pink squares.
    #[must_use]
    pub fn median() -> Self {
        Self {
            style: PlotStyle {
                color: Some("deeppink".to_owned()),
                marker: Some("s".to_owned()),
                markersize: Some(6.0),
                ..PlotStyle::default()
            },
            ..Self::new(Quantity::Median.name())
        }
    }

    /// The configurations used when none are given.
    #[must_use]
    pub fn defaults() -> [Self; 2] {
        [Self::median(), Self::mean()]
    }

    #[must_use]
    pub fn with_yerr(mut self, yerr: impl Into<String>) -> Self {
        self.yerr = Some(yerr.into());
        self
    }

    #[must_use]
    pub fn with_xerr(mut self, xerr: f64) -> Self {
        self.xerr = Some(xerr);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// The explicit label, or `"{quantity} ({xerr}, {yerr})"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use visdata_profile::plot::PlotConfig;
    ///
    /// assert_eq!(PlotConfig::mean().label(), "mean (none, sem)");
    /// assert_eq!(PlotConfig::median().with_label("P50").label(), "P50");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let xerr = self
            .xerr
            .map_or_else(|| "none".to_owned(), |xerr| xerr.to_string());
        let yerr = self.yerr.as_deref().unwrap_or("none");
        format!("{} ({xerr}, {yerr})", self.quantity)
    }

    /// Resolves quantity and error kind names.
    pub fn resolve(&self) -> Result<(Quantity, Option<ErrorKind>), InvalidArgument> {
        let quantity = Quantity::from_name(&self.quantity)?;
        let error_kind = match &self.yerr {
            Some(name) => ErrorKind::from_name(name)?,
            None => None,
        };
        Ok((quantity, error_kind))
    }
}

/// The statistics columns of a profile, all with one entry per bin.
#[derive(Debug, Clone, Copy)]
pub struct ProfileColumns<'a> {
    pub centers: &'a [f64],
    pub mean: &'a [f64],
    pub median: &'a [f64],
    pub std: &'a [f64],
    pub sem: &'a [f64],
}

impl<'a> ProfileColumns<'a> {
    #[must_use]
    pub fn get(&self, statistic: Statistic) -> &'a [f64] {
        match statistic {
            Statistic::Mean => self.mean,
            Statistic::Median => self.median,
            Statistic::Std => self.std,
            Statistic::Sem => self.sem,
        }
    }
}

/// How a surface is expected to draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    /// Markers with error bars.
    ErrorBar,
    /// Plain markers; the marker area is the square of the marker size.
    Scatter,
}

/// One drawing request.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSeries<'a> {
    pub quantity: Quantity,
    pub error_kind: Option<ErrorKind>,
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub yerr: Option<&'a [f64]>,
    pub xerr: Option<f64>,
    pub label: &'a str,
    pub style: &'a PlotStyle,
}

impl ProfileSeries<'_> {
    #[must_use]
    pub fn mark(&self) -> Mark {
        if self.yerr.is_some() || self.xerr.is_some() {
            Mark::ErrorBar
        } else {
            Mark::Scatter
        }
    }

    /// Marker area for scatter marks.
    #[must_use]
    pub fn scatter_size(&self) -> Option<f64> {
        self.style.markersize.map(|size| size * size)
    }
}

/// A target that profile series are drawn onto.
pub trait PlotSurface {
    fn draw(&mut self, series: ProfileSeries<'_>);
}

/// Owned copy of a drawn [`ProfileSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedSeries {
    pub mark: Mark,
    pub quantity: Quantity,
    pub error_kind: Option<ErrorKind>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub yerr: Option<Vec<f64>>,
    pub xerr: Option<f64>,
    pub label: String,
    pub style: PlotStyle,
}

impl From<ProfileSeries<'_>> for RecordedSeries {
    fn from(series: ProfileSeries<'_>) -> Self {
        Self {
            mark: series.mark(),
            quantity: series.quantity,
            error_kind: series.error_kind,
            x: series.x.to_vec(),
            y: series.y.to_vec(),
            yerr: series.yerr.map(<[f64]>::to_vec),
            xerr: series.xerr,
            label: series.label.to_owned(),
            style: series.style.clone(),
        }
    }
}

/// A surface that only remembers what it was asked to draw.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RecordingSurface {
    pub series: Vec<RecordedSeries>,
}

impl PlotSurface for RecordingSurface {
    fn draw(&mut self, series: ProfileSeries<'_>) {
        self.series.push(series.into());
    }
}

/// Draws pre-computed profile statistics onto `surface`.
///
/// All configurations are resolved before anything is drawn; an unknown
/// quantity or error kind fails without drawing. With no configurations,
/// [`PlotConfig::defaults`] is used.
pub fn add_profile_to_surface<S>(
    surface: &mut S,
    centers: &[f64],
    mean: &[f64],
    sem: &[f64],
    std: &[f64],
    median: &[f64],
    configs: &[PlotConfig],
) -> Result<(), InvalidArgument>
where
    S: PlotSurface + ?Sized,
{
    let columns = ProfileColumns {
        centers,
        mean,
        median,
        std,
        sem,
    };
    add_columns_to_surface(surface, &columns, configs)
}

pub(crate) fn add_columns_to_surface<S>(
    surface: &mut S,
    columns: &ProfileColumns<'_>,
    configs: &[PlotConfig],
) -> Result<(), InvalidArgument>
where
    S: PlotSurface + ?Sized,
{
    let defaults;
    let configs = if configs.is_empty() {
        defaults = PlotConfig::defaults();
        &defaults[..]
    } else {
        configs
    };

    let resolved = configs
        .iter()
        .map(|config| {
            let (quantity, error_kind) = config.resolve()?;
            Ok((config, quantity, error_kind, config.label()))
        })
        .collect::<Result<Vec<_>, InvalidArgument>>()?;

    for (config, quantity, error_kind, label) in &resolved {
        surface.draw(ProfileSeries {
            quantity: *quantity,
            error_kind: *error_kind,
            x: columns.centers,
            y: columns.get(quantity.statistic()),
            yerr: error_kind.map(|kind| columns.get(kind.statistic())),
            xerr: config.xerr,
            label,
            style: &config.style,
        });
    }
    Ok(())
}
