//! Welch's averaged periodogram.
//!
//! Splits the series into overlapping segments, takes a windowed periodogram
//! of each and averages them bin-wise. Shorter segments mean fewer, wider
//! bins than a full-length periodogram; averaging `K` segments shrinks the
//! estimator variance roughly by `1/K`.

use crate::dsp::fft::frequency_axis;
use crate::dsp::periodogram::SegmentEstimator;
use crate::dsp::window::WindowKind;
use crate::error::{Result, SpectraError};
use crate::types::{Detrend, EstimateKind, Scaling, Sides, SpectralEstimate, TimeSeries};

/// Segment length used when the caller does not pick one.
pub const DEFAULT_SEGMENT_LEN: usize = 256;

#[derive(Clone, Debug)]
pub struct WelchParams {
    /// Samples per segment. Defaults to [`DEFAULT_SEGMENT_LEN`], clipped to the series length.
    pub segment_len: Option<usize>,
    /// Samples shared by consecutive segments. Defaults to half a segment.
    pub overlap: Option<usize>,
    pub window: WindowKind,
    pub scaling: Scaling,
    pub detrend: Detrend,
    pub sides: Sides,
}

impl Default for WelchParams {
    fn default() -> Self {
        Self {
            segment_len: None,
            overlap: None,
            window: WindowKind::Hann,
            scaling: Scaling::Density,
            detrend: Detrend::Constant,
            sides: Sides::OneSided,
        }
    }
}

/// Segment geometry resolved against a series length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentPlan {
    pub segment_len: usize,
    pub overlap: usize,
    pub step: usize,
    pub segments: usize,
}

impl WelchParams {
    /// Resolve defaults and validate against a series of `n` samples.
    pub fn plan(&self, n: usize) -> Result<SegmentPlan> {
        let segment_len = match self.segment_len {
            Some(0) => return Err(SpectraError::domain("segment_len", "must be at least 1")),
            Some(len) if len > n => {
                log::warn!("welch: segment_len {len} exceeds series length {n}; using {n}");
                n
            }
            Some(len) => len,
            None => DEFAULT_SEGMENT_LEN.min(n),
        };
        let overlap = self.overlap.unwrap_or(segment_len / 2);
        if overlap >= segment_len {
            return Err(SpectraError::domain(
                "overlap",
                format!("{overlap} must be smaller than segment_len {segment_len}"),
            ));
        }
        let step = segment_len - overlap;
        let segments = (n - segment_len) / step + 1;
        Ok(SegmentPlan {
            segment_len,
            overlap,
            step,
            segments,
        })
    }
}

/// Welch power spectral density estimate.
///
/// Trailing samples that do not fill a whole segment are ignored.
pub fn welch(series: &TimeSeries, params: &WelchParams) -> Result<SpectralEstimate> {
    let n = series.len();
    let sample_rate = series.sample_rate();
    let plan = params.plan(n)?;

    let mut estimator = SegmentEstimator::new(
        plan.segment_len,
        params.window,
        params.scaling,
        params.detrend,
        params.sides,
        sample_rate,
    )?;
    let count = estimator.bins();
    let mut accum = vec![0.0f64; count];

    let samples = series.samples();
    for seg in 0..plan.segments {
        let pos = seg * plan.step;
        let psd = estimator.estimate(&samples[pos..pos + plan.segment_len])?;
        for (a, p) in accum.iter_mut().zip(psd.iter()) {
            *a += p;
        }
    }
    let inv = 1.0 / plan.segments as f64;
    for a in accum.iter_mut() {
        *a *= inv;
    }

    log::debug!(
        "welch: {n} samples, {} segments of {} (overlap {}), {count} bins",
        plan.segments,
        plan.segment_len,
        plan.overlap
    );

    Ok(SpectralEstimate {
        frequencies: frequency_axis(plan.segment_len, sample_rate, count),
        values: accum,
        sample_rate,
        signal_len: plan.segment_len,
        transform_len: plan.segment_len,
        sides: params.sides,
        kind: EstimateKind::Psd(params.scaling),
        segments: plan.segments,
        normalization: None,
    })
}
