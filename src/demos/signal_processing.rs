//! Physical-unit FFT next to flat-top periodogram and Welch estimates, all
//! left in absolute units.

use super::{time_domain_figure, Result};
use crate::render::{Figure, LineStyle, Panel, Trace};
use crate::settings::{DemoDefaults, DemoSettings};
use spectra_core::{
    fft_spectrum, generate, periodogram, welch, Normalization, PeriodogramParams, Scaling, Sides,
    SpectrumKind, WelchParams, WindowKind,
};

pub const DEFAULTS: DemoDefaults = DemoDefaults {
    f0: 5.0,
    amplitude: 10.0,
    sample_rate: 50.0,
    num_samples: 390,
    noise_std: 1.0,
};

pub fn run(settings: &DemoSettings) -> Result<Vec<Panel>> {
    let (config, params) = settings.resolve(&DEFAULTS)?;
    let signal = generate(&config, &params)?;

    let mut spectrum = Figure::new("Frequency Spectrum", "Frequency (Hz)", "Voltage (|V|)");
    for (name, style, series) in [
        ("clean", LineStyle::Solid, &signal.clean),
        ("noisy", LineStyle::Dashed, &signal.noisy),
    ] {
        let est = fft_spectrum(series, None, SpectrumKind::Magnitude, Sides::OneSided)?;
        let transform_len = est.physical_len();
        let est = est.normalize(Normalization::Physical { transform_len })?;
        spectrum = spectrum.with_trace(Trace::from_estimate(name, style, &est)?);
    }

    let per_params = PeriodogramParams {
        window: WindowKind::FlatTop,
        scaling: Scaling::Spectrum,
        ..Default::default()
    };
    let per = Figure::new("Method of periodograms", "Frequency (Hz)", "Power (V²)")
        .log_y()
        .with_trace(Trace::from_estimate(
            "noisy",
            LineStyle::Solid,
            &periodogram(&signal.noisy, &per_params)?,
        )?)
        .with_trace(Trace::from_estimate(
            "clean",
            LineStyle::Solid,
            &periodogram(&signal.clean, &per_params)?,
        )?);

    let welch_params = WelchParams {
        scaling: Scaling::Spectrum,
        ..Default::default()
    };
    let welch_fig = Figure::new("Welch's method", "Frequency (Hz)", "Power (V²)")
        .log_y()
        .with_trace(Trace::from_estimate(
            "noisy",
            LineStyle::Dashed,
            &welch(&signal.noisy, &welch_params)?,
        )?)
        .with_trace(Trace::from_estimate(
            "clean",
            LineStyle::Dashed,
            &welch(&signal.clean, &welch_params)?,
        )?);

    Ok(vec![
        time_domain_figure(&signal, "Voltage (V)")?.into(),
        spectrum.into(),
        per.into(),
        welch_fig.into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(panel: &Panel) -> &Figure {
        match panel {
            Panel::Plot(f) => f,
            Panel::Image(_) => panic!("expected a plot"),
        }
    }

    fn value_near(trace: &Trace, freq: f64) -> f64 {
        trace
            .x
            .iter()
            .zip(&trace.y)
            .filter(|(x, _)| (*x - freq).abs() < 0.3)
            .map(|(_, y)| *y)
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_clean_estimates_in_physical_units() {
        let settings = DemoSettings {
            noise_std: Some(0.0),
            ..Default::default()
        };
        let panels = run(&settings).unwrap();
        assert_eq!(panels.len(), 4);

        // 390 samples at 50 Hz: 5 Hz is 39 cycles, exactly on bin 39. The
        // 2.5 Hz subharmonic falls between bins and leaks a little into it.
        let fft_clean = &plot(&panels[1]).traces[0];
        assert_eq!(fft_clean.x.len(), 196);
        assert!((fft_clean.y[39] - 10.0).abs() < 0.2, "{}", fft_clean.y[39]);

        // Flat-top power reads A²/2 at the tone.
        let per_clean = &plot(&panels[2]).traces[1];
        let power = value_near(per_clean, 5.0);
        assert!((power - 50.0).abs() / 50.0 < 0.01, "periodogram power {power}");
    }

    #[test]
    fn test_welch_segments_cover_short_signal() {
        let panels = run(&DemoSettings {
            seed: Some(5),
            ..Default::default()
        })
        .unwrap();
        let welch_noisy = &plot(&panels[3]).traces[0];
        // Default 256-sample segments fit a 390-sample signal.
        assert_eq!(welch_noisy.x.len(), 129);
        assert!(welch_noisy.y.iter().all(|v| *v >= 0.0));
    }
}
