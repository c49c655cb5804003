use crate::dsp::normalize::{self, Normalization};
use crate::error::{NormalizationError, Result, SpectraError};
use serde::{Deserialize, Serialize};

/// Uniformly sampled real signal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeSeries {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl TimeSeries {
    /// Wrap `samples` taken at `sample_rate` Hz.
    ///
    /// Fails when there are no samples or the rate is not a positive finite number.
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(SpectraError::domain("samples", "a time series needs at least one sample"));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectraError::domain(
                "sample_rate",
                format!("must be positive and finite, got {sample_rate}"),
            ));
        }
        Ok(Self { samples, sample_rate })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sample interval in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept alongside `len` for clippy.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Sample instants `i * dt`.
    pub fn times(&self) -> Vec<f64> {
        let dt = self.dt();
        (0..self.samples.len()).map(|i| i as f64 * dt).collect()
    }
}

/// Which part of a real signal's spectrum to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sides {
    /// Non-redundant half, `0..=Fs/2`.
    #[default]
    OneSided,
    /// Full DFT output on the `0..Fs` axis; the upper half mirrors the lower.
    TwoSided,
}

/// Quantity produced by the direct FFT strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectrumKind {
    /// `|X[k]|`
    Magnitude,
    /// `|X[k]|^2`
    Power,
}

/// Window-loss correction applied by the periodogram and Welch estimators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scaling {
    /// Power per unit frequency (V²/Hz). Suits broadband / noise estimates.
    #[default]
    Density,
    /// Mean squared amplitude per bin (V²). Suits tone amplitude estimates.
    Spectrum,
}

/// Per-segment trend removal before windowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Detrend {
    None,
    /// Subtract the mean.
    #[default]
    Constant,
}

/// What the values of a [`SpectralEstimate`] measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateKind {
    Magnitude,
    Power,
    Psd(Scaling),
}

/// Frequency axis paired with non-negative magnitude or power values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpectralEstimate {
    pub frequencies: Vec<f64>,
    pub values: Vec<f64>,
    pub sample_rate: f64,
    /// Number of real (non-padded) samples per transform.
    pub signal_len: usize,
    /// Transform length after zero padding (per segment for Welch).
    pub transform_len: usize,
    pub sides: Sides,
    pub kind: EstimateKind,
    /// Periodograms averaged into `values`; 1 unless produced by Welch.
    pub segments: usize,
    /// Policy applied by [`SpectralEstimate::normalize`], if any.
    pub normalization: Option<Normalization>,
}

impl SpectralEstimate {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Frequency bin width `Fs / transform_len`.
    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.transform_len as f64
    }

    /// Length to pass to [`normalize::physical_scale`] so a tone's peak reads as
    /// its amplitude, whether or not the transform was zero-padded.
    pub fn physical_len(&self) -> usize {
        self.signal_len
    }

    /// `(frequency, value)` of the largest bin. Ties resolve to the lowest frequency.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let mut best: Option<usize> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some(b) if self.values[b] >= v => {}
                _ if v.is_nan() => {}
                _ => best = Some(i),
            }
        }
        best.map(|i| (self.frequencies[i], self.values[i]))
    }

    /// Drop the mirrored upper half of a two-sided estimate.
    ///
    /// One-sided estimates are returned unchanged. Values are truncated, not
    /// folded, matching what callers of the direct FFT did by convention.
    pub fn truncated_to_nyquist(mut self) -> Self {
        if self.sides == Sides::OneSided {
            return self;
        }
        let keep = self.transform_len / 2 + 1;
        self.frequencies.truncate(keep);
        self.values.truncate(keep);
        self.sides = Sides::OneSided;
        self
    }

    /// Apply exactly one normalization policy.
    ///
    /// A second call fails with [`NormalizationError::AlreadyNormalized`].
    pub fn normalize(mut self, policy: Normalization) -> Result<Self> {
        if let Some(applied) = self.normalization {
            return Err(NormalizationError::AlreadyNormalized(applied).into());
        }
        self.values = match policy {
            Normalization::Peak => normalize::peak_normalize(&self.values)?,
            Normalization::Physical { transform_len } => {
                normalize::physical_scale(&self.values, transform_len)?
            }
        };
        self.normalization = Some(policy);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(values: Vec<f64>) -> SpectralEstimate {
        let n = values.len();
        SpectralEstimate {
            frequencies: (0..n).map(|k| k as f64).collect(),
            values,
            sample_rate: n as f64,
            signal_len: n,
            transform_len: n,
            sides: Sides::TwoSided,
            kind: EstimateKind::Magnitude,
            segments: 1,
            normalization: None,
        }
    }

    #[test]
    fn test_time_series_rejects_empty_and_bad_rate() {
        assert!(TimeSeries::new(vec![], 10.0).is_err());
        assert!(TimeSeries::new(vec![1.0], 0.0).is_err());
        assert!(TimeSeries::new(vec![1.0], -5.0).is_err());
        assert!(TimeSeries::new(vec![1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_time_axis() {
        let ts = TimeSeries::new(vec![0.0; 4], 4.0).unwrap();
        assert_eq!(ts.times(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(ts.dt(), 0.25);
        assert_eq!(ts.duration_secs(), 1.0);
    }

    #[test]
    fn test_peak_prefers_first_maximum() {
        let est = estimate(vec![1.0, 3.0, 2.0, 3.0]);
        assert_eq!(est.peak(), Some((1.0, 3.0)));
    }

    #[test]
    fn test_truncate_two_sided() {
        let est = estimate(vec![0.0, 1.0, 2.0, 1.0]).truncated_to_nyquist();
        assert_eq!(est.values, vec![0.0, 1.0, 2.0]);
        assert_eq!(est.sides, Sides::OneSided);
    }

    #[test]
    fn test_policies_never_compose() {
        let est = estimate(vec![1.0, 4.0, 2.0])
            .normalize(Normalization::Peak)
            .unwrap();
        assert_eq!(est.values, vec![0.25, 1.0, 0.5]);

        let err = est
            .normalize(Normalization::Physical { transform_len: 3 })
            .unwrap_err();
        assert_eq!(
            err,
            SpectraError::Normalization(NormalizationError::AlreadyNormalized(Normalization::Peak))
        );
    }
}
