use crate::error::{Result, SpectraError};
use crate::types::{EstimateKind, Sides, SpectralEstimate, SpectrumKind, TimeSeries};
use realfft::num_complex::Complex;
use realfft::RealFftPlanner;
use std::cell::RefCell;

thread_local! {
    static FFT_PLANNER: RefCell<RealFftPlanner<f64>> = RefCell::new(RealFftPlanner::new());
}

/// Exponent of the next power of two: smallest `p` with `2^p >= n`.
pub fn nextpow2(n: usize) -> u32 {
    n.max(1).next_power_of_two().trailing_zeros()
}

/// Smallest power of two `>= n`; the usual zero-padding length.
pub fn next_pow2_len(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Number of bins in a spectrum of transform length `len`.
pub(crate) fn bin_count(len: usize, sides: Sides) -> usize {
    match sides {
        Sides::OneSided => len / 2 + 1,
        Sides::TwoSided => len,
    }
}

/// Bin centres `k * Fs / len` for the first `count` bins.
pub(crate) fn frequency_axis(len: usize, sample_rate: f64, count: usize) -> Vec<f64> {
    let df = sample_rate / len as f64;
    (0..count).map(|k| k as f64 * df).collect()
}

/// Forward real FFT of `input` zero-padded to `len`.
///
/// Returns the `len / 2 + 1` non-redundant bins. `input` may be shorter than
/// `len` but never longer.
pub(crate) fn rfft(input: &[f64], len: usize) -> Result<Vec<Complex<f64>>> {
    debug_assert!(input.len() <= len);
    if len == 1 {
        // Single-bin transform is the identity.
        return Ok(vec![Complex::new(input.first().copied().unwrap_or(0.0), 0.0)]);
    }

    let fft = FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_forward(len));
    let mut buffer = fft.make_input_vec();
    buffer[..input.len()].copy_from_slice(input);
    let mut spectrum = fft.make_output_vec();
    fft.process(&mut buffer, &mut spectrum)
        .map_err(|e| SpectraError::Fft(e.to_string()))?;
    Ok(spectrum)
}

/// `|X[k]|^2` of `input` zero-padded to `len`, non-redundant half only.
pub(crate) fn power_half_spectrum(input: &[f64], len: usize) -> Result<Vec<f64>> {
    Ok(rfft(input, len)?.iter().map(|c| c.norm_sqr()).collect())
}

/// Mirror a half spectrum of a length-`len` real transform into all `len` bins.
///
/// `|X[len - k]| == |X[k]|` for real input, so magnitudes copy across.
pub(crate) fn mirror_to_two_sided(half: &[f64], len: usize) -> Vec<f64> {
    let mut full = Vec::with_capacity(len);
    full.extend_from_slice(&half[..half.len().min(len)]);
    for k in full.len()..len {
        full.push(half[len - k]);
    }
    full
}

/// Direct FFT magnitude or power spectrum of `series`.
///
/// The series is zero-padded to `zero_pad_len` when given, which must not be
/// shorter than the series. No scaling is applied: follow up with exactly one
/// [`Normalization`](crate::dsp::normalize::Normalization) if needed.
///
/// Frequency bins sit at `k * Fs / M`. `Sides::TwoSided` returns all `M` bins
/// (upper half is the negative-frequency mirror); `Sides::OneSided` returns
/// the first `M / 2 + 1`.
pub fn fft_spectrum(
    series: &TimeSeries,
    zero_pad_len: Option<usize>,
    kind: SpectrumKind,
    sides: Sides,
) -> Result<SpectralEstimate> {
    let n = series.len();
    let m = zero_pad_len.unwrap_or(n);
    if m < n {
        return Err(SpectraError::domain(
            "zero_pad_len",
            format!("{m} is shorter than the series ({n} samples)"),
        ));
    }

    let half = rfft(series.samples(), m)?;
    let half_values: Vec<f64> = half
        .iter()
        .map(|c| match kind {
            SpectrumKind::Magnitude => c.norm(),
            SpectrumKind::Power => c.norm_sqr(),
        })
        .collect();

    let count = bin_count(m, sides);
    let values = match sides {
        Sides::OneSided => half_values,
        Sides::TwoSided => mirror_to_two_sided(&half_values, m),
    };
    debug_assert_eq!(values.len(), count);

    log::debug!(
        "fft_spectrum: {n} samples, transform length {m}, {count} bins ({sides:?})"
    );

    Ok(SpectralEstimate {
        frequencies: frequency_axis(m, series.sample_rate(), count),
        values,
        sample_rate: series.sample_rate(),
        signal_len: n,
        transform_len: m,
        sides,
        kind: match kind {
            SpectrumKind::Magnitude => EstimateKind::Magnitude,
            SpectrumKind::Power => EstimateKind::Power,
        },
        segments: 1,
        normalization: None,
    })
}
