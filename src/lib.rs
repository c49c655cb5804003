//! Worked spectral-estimation examples on top of `spectra-core`: demo
//! scenarios, layered settings, and presenters that draw figures in the
//! terminal or write them out as JSON, CSV and PGM files.

pub mod demos;
pub mod render;
pub mod settings;

pub use demos::{DemoError, DemoKind};
pub use render::{
    CsvPresenter, Figure, ImageFigure, JsonPresenter, Panel, Presenter, RenderError, TextPresenter,
};
pub use settings::{load_settings, DemoSettings, OutputFormat, SettingsError};

/// Hand every panel to a presenter, stopping at the first failure.
pub fn present_all(presenter: &mut dyn Presenter, panels: &[Panel]) -> Result<(), RenderError> {
    for panel in panels {
        presenter.present_panel(panel)?;
    }
    Ok(())
}
