use super::RenderError;
use serde::Serialize;
use spectra_core::{Image, SpectralEstimate, TimeSeries};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// One named line: equal-length x and y sequences.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub style: LineStyle,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Trace {
    pub fn new(
        name: impl Into<String>,
        style: LineStyle,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Result<Self, RenderError> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(RenderError::LengthMismatch {
                name,
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(RenderError::EmptyTrace(name));
        }
        Ok(Self { name, style, x, y })
    }

    /// Samples against time in seconds.
    pub fn from_series(
        name: impl Into<String>,
        style: LineStyle,
        series: &TimeSeries,
    ) -> Result<Self, RenderError> {
        Self::new(name, style, series.times(), series.samples().to_vec())
    }

    /// Values against frequency in Hz.
    pub fn from_estimate(
        name: impl Into<String>,
        style: LineStyle,
        estimate: &SpectralEstimate,
    ) -> Result<Self, RenderError> {
        Self::new(
            name,
            style,
            estimate.frequencies.clone(),
            estimate.values.clone(),
        )
    }

    /// Range of x values.
    pub fn x_range(&self) -> (f64, f64) {
        span(&self.x)
    }
}

/// A titled 2-D plot of one or more traces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_scale: AxisScale,
    /// Visible x window; the full data range when `None`.
    pub x_limit: Option<(f64, f64)>,
    pub traces: Vec<Trace>,
}

impl Figure {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            y_scale: AxisScale::Linear,
            x_limit: None,
            traces: Vec::new(),
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    pub fn log_y(mut self) -> Self {
        self.y_scale = AxisScale::Log;
        self
    }

    pub fn with_x_limit(mut self, lo: f64, hi: f64) -> Self {
        self.x_limit = Some((lo, hi));
        self
    }

    /// Visible x window: the explicit limit, else the span of all traces.
    pub fn x_window(&self) -> (f64, f64) {
        if let Some(limit) = self.x_limit {
            return limit;
        }
        self.traces
            .iter()
            .map(Trace::x_range)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}

/// A titled greyscale image panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageFigure {
    pub title: String,
    pub image: Image,
}

impl ImageFigure {
    pub fn new(title: impl Into<String>, image: Image) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }
}

/// Anything a demo hands to a presenter.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Plot(Figure),
    Image(ImageFigure),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Plot(f) => &f.title,
            Panel::Image(f) => &f.title,
        }
    }
}

impl From<Figure> for Panel {
    fn from(f: Figure) -> Self {
        Panel::Plot(f)
    }
}

impl From<ImageFigure> for Panel {
    fn from(f: ImageFigure) -> Self {
        Panel::Image(f)
    }
}

pub(crate) fn span(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
