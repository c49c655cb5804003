//! Direct FFT of a two-tone signal in physical units, with and without
//! zero-padding.
//!
//! The padded trace is scaled by `2/N` with `N` the real sample count, not
//! by `2/N_pad`. Tone heights therefore match the unpadded trace, and sit
//! `N_pad/N` higher than a plot normalised by the padded length.

use super::{time_domain_figure, Result};
use crate::render::{Figure, LineStyle, Panel, Trace};
use crate::settings::{DemoDefaults, DemoSettings};
use spectra_core::{
    fft_spectrum, generate, next_pow2_len, Normalization, Sides, SpectralEstimate, SpectrumKind,
    TimeSeries,
};

pub const DEFAULTS: DemoDefaults = DemoDefaults {
    f0: 5.0,
    amplitude: 10.0,
    sample_rate: 50.0,
    num_samples: 500,
    noise_std: 1.0,
};

/// One-sided `2/N · |X|`, with `N` the number of real samples.
fn physical_spectrum(series: &TimeSeries, zero_pad_len: Option<usize>) -> Result<SpectralEstimate> {
    let est = fft_spectrum(series, zero_pad_len, SpectrumKind::Magnitude, Sides::OneSided)?;
    let transform_len = est.physical_len();
    Ok(est.normalize(Normalization::Physical { transform_len })?)
}

pub fn run(settings: &DemoSettings) -> Result<Vec<Panel>> {
    let (config, params) = settings.resolve(&DEFAULTS)?;
    let signal = generate(&config, &params)?;
    let padded_len = next_pow2_len(signal.noisy.len());

    let clean = physical_spectrum(&signal.clean, None)?;
    let noisy = physical_spectrum(&signal.noisy, None)?;
    let padded = physical_spectrum(&signal.noisy, Some(padded_len))?;
    log::debug!(
        "fft demo: {} samples, padded to {padded_len}, bin width {:.4} Hz -> {:.4} Hz",
        signal.noisy.len(),
        noisy.bin_width(),
        padded.bin_width()
    );

    let spectrum = Figure::new("Frequency Spectrum", "Frequency (Hz)", "Voltage (|V|)")
        .with_trace(Trace::from_estimate("noisy", LineStyle::Dashed, &noisy)?)
        .with_trace(Trace::from_estimate("clean", LineStyle::Dotted, &clean)?)
        .with_trace(Trace::from_estimate(
            format!("noisy, zero-padded to {padded_len}"),
            LineStyle::Solid,
            &padded,
        )?);

    Ok(vec![
        time_domain_figure(&signal, "Voltage (V)")?.into(),
        spectrum.into(),
    ])
}
