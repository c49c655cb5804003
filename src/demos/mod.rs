//! The five worked examples, each a function from settings to panels.

pub mod fft_example;
pub mod image_filters;
pub mod pressure_field;
pub mod psd_estimation;
pub mod signal_processing;

use crate::render::{Figure, LineStyle, Panel, RenderError, Trace};
use crate::settings::DemoSettings;
use spectra_core::{SpectraError, SynthesizedSignal};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error(transparent)]
    Core(#[from] SpectraError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    Fft,
    Psd,
    Signal,
    Image,
    Field,
}

impl DemoKind {
    pub const ALL: [DemoKind; 5] = [
        DemoKind::Fft,
        DemoKind::Psd,
        DemoKind::Signal,
        DemoKind::Image,
        DemoKind::Field,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Fft => "fft",
            DemoKind::Psd => "psd",
            DemoKind::Signal => "signal",
            DemoKind::Image => "image",
            DemoKind::Field => "field",
        }
    }

    pub fn run(self, settings: &DemoSettings) -> Result<Vec<Panel>> {
        log::info!("running {} demo", self.name());
        let panels = match self {
            DemoKind::Fft => fft_example::run(settings)?,
            DemoKind::Psd => psd_estimation::run(settings)?,
            DemoKind::Signal => signal_processing::run(settings)?,
            DemoKind::Image => image_filters::run(settings)?,
            DemoKind::Field => pressure_field::run(settings)?,
        };
        log::info!("{} demo produced {} panels", self.name(), panels.len());
        Ok(panels)
    }
}

/// Clean (dashed) and noisy (solid) signals against time.
pub(crate) fn time_domain_figure(
    signal: &SynthesizedSignal,
    y_label: &str,
) -> std::result::Result<Figure, RenderError> {
    Ok(Figure::new("Time-domain signal", "Time (s)", y_label)
        .with_trace(Trace::from_series("noisy", LineStyle::Solid, &signal.noisy)?)
        .with_trace(Trace::from_series("clean", LineStyle::Dashed, &signal.clean)?))
}
