//! Amplitude normalization policies.
//!
//! Two mutually exclusive ways of putting a spectrum on a readable scale:
//! relative to its own peak, or in the signal's physical units via `2/N`.
//! Callers pick exactly one per estimate.

use crate::error::{NormalizationError, Result, SpectraError};
use serde::{Deserialize, Serialize};

/// A normalization policy, as recorded on a normalized estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    /// Divide by the maximum value.
    Peak,
    /// Multiply by `2 / transform_len`.
    Physical { transform_len: usize },
}

/// Divide every value by the maximum, so the result peaks at exactly 1.0.
///
/// An all-zero input has no peak and fails with [`NormalizationError::AllZero`]
/// instead of producing NaNs.
pub fn peak_normalize(values: &[f64]) -> std::result::Result<Vec<f64>, NormalizationError> {
    if values.is_empty() {
        return Err(NormalizationError::Empty);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.iter().any(|v| v.is_nan()) || !max.is_finite() {
        let bad = values.iter().copied().find(|v| !v.is_finite()).unwrap_or(max);
        return Err(NormalizationError::NonFinite(bad));
    }
    if max == 0.0 {
        return Err(NormalizationError::AllZero);
    }
    if max < 0.0 {
        return Err(NormalizationError::NonPositive(max));
    }
    Ok(values.iter().map(|&v| v / max).collect())
}

/// Scale by `2 / transform_len` to approximate a single-sided amplitude spectrum.
///
/// For a zero-padded transform pass the number of real samples
/// ([`SpectralEstimate::physical_len`](crate::types::SpectralEstimate::physical_len))
/// to read tone amplitudes directly; passing the padded length shrinks peaks by
/// `N / M`.
pub fn physical_scale(values: &[f64], transform_len: usize) -> Result<Vec<f64>> {
    if transform_len == 0 {
        return Err(SpectraError::domain("transform_len", "must be at least 1"));
    }
    let factor = 2.0 / transform_len as f64;
    Ok(values.iter().map(|&v| v * factor).collect())
}
