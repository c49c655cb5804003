use crate::dsp::fft::{bin_count, frequency_axis, mirror_to_two_sided, power_half_spectrum};
use crate::dsp::window::{window, Symmetry, WindowKind};
use crate::error::{Result, SpectraError};
use crate::types::{Detrend, EstimateKind, Scaling, Sides, SpectralEstimate, TimeSeries};

#[derive(Clone, Debug)]
pub struct PeriodogramParams {
    pub window: WindowKind,
    pub scaling: Scaling,
    pub detrend: Detrend,
    pub sides: Sides,
}

impl Default for PeriodogramParams {
    fn default() -> Self {
        Self {
            window: WindowKind::FlatTop,
            scaling: Scaling::Density,
            detrend: Detrend::Constant,
            sides: Sides::OneSided,
        }
    }
}

/// Window, detrend and scale applied to every transform of one length.
///
/// Shared between the single-shot periodogram and each Welch segment.
pub(crate) struct SegmentEstimator {
    len: usize,
    window: Vec<f64>,
    detrend: Detrend,
    scale: f64,
    sides: Sides,
    scratch: Vec<f64>,
}

impl SegmentEstimator {
    pub(crate) fn new(
        len: usize,
        kind: WindowKind,
        scaling: Scaling,
        detrend: Detrend,
        sides: Sides,
        sample_rate: f64,
    ) -> Result<Self> {
        let window = window(kind, len, Symmetry::Periodic)?;
        let sum: f64 = window.iter().sum();
        let sum_sq: f64 = window.iter().map(|w| w * w).sum();
        if sum == 0.0 || sum_sq == 0.0 {
            return Err(SpectraError::domain(
                "window",
                format!("{kind:?} of length {len} has no energy"),
            ));
        }
        let scale = match scaling {
            Scaling::Spectrum => 1.0 / (sum * sum),
            Scaling::Density => 1.0 / (sample_rate * sum_sq),
        };
        Ok(Self {
            len,
            window,
            detrend,
            scale,
            sides,
            scratch: vec![0.0; len],
        })
    }

    pub(crate) fn bins(&self) -> usize {
        bin_count(self.len, self.sides)
    }

    /// Scaled periodogram of one `len`-sample segment.
    pub(crate) fn estimate(&mut self, segment: &[f64]) -> Result<Vec<f64>> {
        debug_assert_eq!(segment.len(), self.len);
        let offset = match self.detrend {
            Detrend::None => 0.0,
            Detrend::Constant => segment.iter().sum::<f64>() / segment.len() as f64,
        };
        for (out, (&s, &w)) in self.scratch.iter_mut().zip(segment.iter().zip(self.window.iter())) {
            *out = (s - offset) * w;
        }

        let mut power = power_half_spectrum(&self.scratch, self.len)?;
        for p in power.iter_mut() {
            *p *= self.scale;
        }

        Ok(match self.sides {
            Sides::TwoSided => mirror_to_two_sided(&power, self.len),
            Sides::OneSided => {
                // Fold negative frequencies in: double all but DC and, for even
                // lengths, the Nyquist bin which has no mirror partner.
                let last = power.len() - 1;
                let end = if self.len % 2 == 0 { last } else { last + 1 };
                for p in power.iter_mut().take(end).skip(1) {
                    *p *= 2.0;
                }
                power
            }
        })
    }
}

/// Windowed periodogram of the full series.
///
/// One-sided output has `N / 2 + 1` bins spanning `0..=Fs/2`.
pub fn periodogram(series: &TimeSeries, params: &PeriodogramParams) -> Result<SpectralEstimate> {
    let n = series.len();
    let sample_rate = series.sample_rate();
    let mut estimator = SegmentEstimator::new(
        n,
        params.window,
        params.scaling,
        params.detrend,
        params.sides,
        sample_rate,
    )?;
    let values = estimator.estimate(series.samples())?;
    let count = estimator.bins();

    log::debug!(
        "periodogram: {n} samples, {:?} window, {:?} scaling, {count} bins",
        params.window,
        params.scaling
    );

    Ok(SpectralEstimate {
        frequencies: frequency_axis(n, sample_rate, count),
        values,
        sample_rate,
        signal_len: n,
        transform_len: n,
        sides: params.sides,
        kind: EstimateKind::Psd(params.scaling),
        segments: 1,
        normalization: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, amplitude: f64, sample_rate: f64, n: usize) -> TimeSeries {
        let samples = (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect();
        TimeSeries::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_axis_is_one_sided() {
        for n in [390usize, 391, 2000] {
            let ts = tone(5.0, 1.0, 50.0, n);
            let est = periodogram(&ts, &PeriodogramParams::default()).unwrap();
            assert_eq!(est.values.len(), n / 2 + 1);
            assert_eq!(est.frequencies.len(), n / 2 + 1);
            assert_eq!(est.frequencies[0], 0.0);
            assert!(*est.frequencies.last().unwrap() <= 25.0 + 1e-12);
        }
    }

    #[test]
    fn test_flat_top_spectrum_reads_tone_power() {
        // Off-bin tone: flat-top keeps the amplitude estimate within a fraction of a dB.
        let ts = tone(10.35, 4.0, 100.0, 1000);
        let params = PeriodogramParams {
            scaling: Scaling::Spectrum,
            ..PeriodogramParams::default()
        };
        let est = periodogram(&ts, &params).unwrap();
        let (freq, power) = est.peak().unwrap();
        // Mean square of A*sin is A^2 / 2.
        assert!((power - 8.0).abs() < 8.0 * 0.01, "peak power {power}");
        // The flat passband spans a few bins; any of them may win.
        assert!((freq - 10.35).abs() <= 2.0 * est.bin_width(), "peak at {freq} Hz");
    }

    #[test]
    fn test_density_integrates_to_variance() {
        // Rectangular-window density sums to the mean-removed signal power (Parseval).
        let samples: Vec<f64> = (0..256).map(|i| ((i * 37 % 101) as f64) / 50.0 - 1.0).collect();
        let mean = samples.iter().sum::<f64>() / 256.0;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / 256.0;
        let ts = TimeSeries::new(samples, 8.0).unwrap();
        let params = PeriodogramParams {
            window: WindowKind::Rectangular,
            ..PeriodogramParams::default()
        };
        let est = periodogram(&ts, &params).unwrap();
        let total: f64 = est.values.iter().sum::<f64>() * est.bin_width();
        assert!((total - variance).abs() < 1e-9, "{total} vs {variance}");
    }

    #[test]
    fn test_constant_detrend_removes_dc() {
        let ts = TimeSeries::new(vec![3.0; 64], 64.0).unwrap();
        let est = periodogram(&ts, &PeriodogramParams::default()).unwrap();
        assert!(est.values.iter().all(|&v| v.abs() < 1e-20));

        let raw = PeriodogramParams {
            detrend: Detrend::None,
            ..PeriodogramParams::default()
        };
        let est = periodogram(&ts, &raw).unwrap();
        assert!(est.values[0] > 0.0);
    }

    #[test]
    fn test_two_sided_halves_one_sided_interior() {
        let ts = tone(4.0, 1.0, 32.0, 64);
        let params = PeriodogramParams {
            window: WindowKind::Hann,
            ..PeriodogramParams::default()
        };
        let one = periodogram(&ts, &params).unwrap();
        let two = periodogram(
            &ts,
            &PeriodogramParams {
                sides: Sides::TwoSided,
                ..params
            },
        )
        .unwrap();
        assert_eq!(two.values.len(), 64);
        for k in 1..32 {
            assert!((one.values[k] - 2.0 * two.values[k]).abs() < 1e-12);
        }
        assert!((one.values[32] - two.values[32]).abs() < 1e-12);
    }
}
