//! Three power estimators side by side, each peak-normalised and zoomed to
//! `[0, 2 f0]`.

use super::{time_domain_figure, Result};
use crate::render::{Figure, LineStyle, Panel, Trace};
use crate::settings::{DemoDefaults, DemoSettings};
use spectra_core::{
    fft_spectrum, generate, next_pow2_len, periodogram, welch, Normalization, PeriodogramParams,
    Scaling, Sides, SpectralEstimate, SpectrumKind, WelchParams, WindowKind,
};

pub const DEFAULTS: DemoDefaults = DemoDefaults {
    f0: 24.0,
    amplitude: 10.0,
    sample_rate: 200.0,
    num_samples: 2000,
    noise_std: 2.0,
};

fn pair_figure(
    title: &str,
    y_label: &str,
    clean: &SpectralEstimate,
    noisy: &SpectralEstimate,
) -> Result<Figure> {
    Ok(Figure::new(title, "Frequency (Hz)", y_label)
        .with_trace(Trace::from_estimate("clean", LineStyle::Dashed, clean)?)
        .with_trace(Trace::from_estimate("noisy", LineStyle::Solid, noisy)?))
}

pub fn run(settings: &DemoSettings) -> Result<Vec<Panel>> {
    let (config, params) = settings.resolve(&DEFAULTS)?;
    let signal = generate(&config, &params)?;
    let zoom = 2.0 * config.f0();
    let n = signal.noisy.len();

    let time = time_domain_figure(&signal, "Amplitude")?
        .with_x_limit(0.0, signal.clean.duration_secs() / 10.0);

    let fft_clean = fft_spectrum(&signal.clean, None, SpectrumKind::Power, Sides::OneSided)?
        .normalize(Normalization::Peak)?;
    let fft_noisy = fft_spectrum(
        &signal.noisy,
        Some(next_pow2_len(n)),
        SpectrumKind::Power,
        Sides::OneSided,
    )?
    .normalize(Normalization::Peak)?;
    let spectrum = pair_figure("Frequency Spectrum", "Power (norm)", &fft_clean, &fft_noisy)?
        .with_x_limit(0.0, zoom);

    let per_params = PeriodogramParams {
        window: WindowKind::FlatTop,
        scaling: Scaling::Spectrum,
        ..Default::default()
    };
    let per_clean = periodogram(&signal.clean, &per_params)?.normalize(Normalization::Peak)?;
    let per_noisy = periodogram(&signal.noisy, &per_params)?.normalize(Normalization::Peak)?;
    let per = pair_figure("Method of periodograms", "PSD (norm)", &per_clean, &per_noisy)?
        .log_y()
        .with_x_limit(0.0, zoom);

    let welch_params = WelchParams {
        scaling: Scaling::Spectrum,
        ..Default::default()
    };
    let welch_clean = welch(&signal.clean, &welch_params)?.normalize(Normalization::Peak)?;
    let welch_noisy = welch(&signal.noisy, &welch_params)?.normalize(Normalization::Peak)?;
    log::debug!(
        "psd demo: welch averaged {} segments, {} bins",
        welch_noisy.segments,
        welch_noisy.len()
    );
    let welch_fig = pair_figure("Welch's method", "PSD (norm)", &welch_clean, &welch_noisy)?
        .log_y()
        .with_x_limit(0.0, zoom);

    Ok(vec![time.into(), spectrum.into(), per.into(), welch_fig.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demos::DemoError;
    use crate::render::AxisScale;
    use spectra_core::{NormalizationError, SpectraError};

    fn plots(settings: &DemoSettings) -> Vec<Figure> {
        run(settings)
            .unwrap()
            .into_iter()
            .map(|p| match p {
                Panel::Plot(f) => f,
                Panel::Image(_) => panic!("expected only plots"),
            })
            .collect()
    }

    fn argmax(trace: &Trace) -> f64 {
        let mut best = 0;
        for (i, &v) in trace.y.iter().enumerate() {
            if v > trace.y[best] {
                best = i;
            }
        }
        trace.x[best]
    }

    #[test]
    fn test_all_estimators_peak_at_one_near_f0() {
        let figs = plots(&DemoSettings {
            seed: Some(11),
            ..Default::default()
        });
        assert_eq!(figs.len(), 4);
        for fig in &figs[1..] {
            assert_eq!(fig.x_limit, Some((0.0, 48.0)));
            for trace in &fig.traces {
                let max = trace.y.iter().copied().fold(0.0, f64::max);
                assert!((max - 1.0).abs() < 1e-12, "{} / {}: max {max}", fig.title, trace.name);
                let at = argmax(trace);
                // Welch's 256-sample segments give 0.78 Hz bins.
                assert!((at - 24.0).abs() < 0.8, "{} / {}: peak at {at}", fig.title, trace.name);
            }
        }
    }

    #[test]
    fn test_axes_and_zoom() {
        let figs = plots(&DemoSettings {
            seed: Some(2),
            ..Default::default()
        });
        assert_eq!(figs[0].x_limit, Some((0.0, 1.0)));
        assert_eq!(figs[1].y_scale, AxisScale::Linear);
        assert_eq!(figs[2].y_scale, AxisScale::Log);
        assert_eq!(figs[3].y_scale, AxisScale::Log);
        // Noisy FFT is padded to 2048 points.
        assert_eq!(figs[1].traces[1].x.len(), 1025);
        assert_eq!(figs[3].traces[0].x.len(), 129);
    }

    #[test]
    fn test_silent_signal_cannot_be_peak_normalised() {
        let settings = DemoSettings {
            amplitude: Some(0.0),
            noise_std: Some(0.0),
            ..Default::default()
        };
        let err = run(&settings).unwrap_err();
        assert!(
            matches!(
                err,
                DemoError::Core(SpectraError::Normalization(NormalizationError::AllZero))
            ),
            "{err}"
        );
    }
}
