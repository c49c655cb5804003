//! Presentation: figures built from estimates, and presenters that turn them
//! into terminal plots or data files.

pub mod colors;
pub mod figure;
pub mod output;
pub mod raster;
pub mod text_plot;

pub use figure::{AxisScale, Figure, ImageFigure, LineStyle, Panel, Trace};
pub use output::{CsvPresenter, JsonPresenter, Presenter, TextPresenter};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("trace '{name}' has {x} x values but {y} y values")]
    LengthMismatch { name: String, x: usize, y: usize },

    #[error("trace '{0}' has no points")]
    EmptyTrace(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
