//! Window functions for the periodogram, Welch and blur filters.

use crate::error::{Result, SpectraError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Flat-top coefficients: sidelobes below -90 dB, nearly flat passband,
/// so a tone reads the same amplitude wherever it falls inside a bin.
const FLAT_TOP: [f64; 5] = [
    0.21557895,
    0.41663158,
    0.277263158,
    0.083578947,
    0.006947368,
];

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub enum WindowKind {
    Rectangular,
    #[default]
    Hann,
    FlatTop,
    /// Gaussian with standard deviation `std` in samples.
    Gaussian { std: f64 },
}

/// Window symmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// DFT-even: the symmetric window of length `len + 1` minus its last point.
    /// Used for spectral estimation.
    Periodic,
    /// Symmetric about the centre; used for filter design.
    Symmetric,
}

/// Build `len` coefficients of the given window.
pub fn window(kind: WindowKind, len: usize, symmetry: Symmetry) -> Result<Vec<f64>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if len == 1 {
        return Ok(vec![1.0]);
    }
    if let WindowKind::Gaussian { std } = kind {
        if !std.is_finite() || std <= 0.0 {
            return Err(SpectraError::domain(
                "std",
                format!("gaussian window needs a positive finite std, got {std}"),
            ));
        }
    }

    // Periodic windows are symmetric windows one point longer, truncated.
    let span = match symmetry {
        Symmetry::Periodic => len,
        Symmetry::Symmetric => len - 1,
    } as f64;

    let coeffs = (0..len)
        .map(|i| {
            let x = i as f64;
            match kind {
                WindowKind::Rectangular => 1.0,
                WindowKind::Hann => 0.5 - 0.5 * (2.0 * PI * x / span).cos(),
                WindowKind::FlatTop => FLAT_TOP
                    .iter()
                    .enumerate()
                    .map(|(k, &a)| {
                        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                        sign * a * (2.0 * PI * k as f64 * x / span).cos()
                    })
                    .sum(),
                WindowKind::Gaussian { std } => {
                    let n = x - span / 2.0;
                    (-(n * n) / (2.0 * std * std)).exp()
                }
            }
        })
        .collect();
    Ok(coeffs)
}

/// Symmetric Gaussian of `len` taps, peak value 1 (not unit sum).
pub fn gaussian(len: usize, std: f64) -> Result<Vec<f64>> {
    window(WindowKind::Gaussian { std }, len, Symmetry::Symmetric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_periodic_endpoints() {
        let w = window(WindowKind::Hann, 8, Symmetry::Periodic).unwrap();
        assert_eq!(w.len(), 8);
        assert!(w[0].abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12, "centre of periodic hann is 1, got {}", w[4]);
        // Periodic: w[k] == w[N-k]
        for k in 1..8 {
            assert!((w[k] - w[8 - k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hann_symmetric_endpoints() {
        let w = window(WindowKind::Hann, 9, Symmetry::Symmetric).unwrap();
        assert!(w[0].abs() < 1e-12 && w[8].abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_top_peak_and_edges() {
        let w = window(WindowKind::FlatTop, 65, Symmetry::Symmetric).unwrap();
        // Coefficients sum to ~1.0 at the centre.
        assert!((w[32] - 1.0).abs() < 1e-6, "centre = {}", w[32]);
        // Edge value is a0 - a1 + a2 - a3 + a4, slightly negative.
        assert!((w[0] - (-0.000421051)).abs() < 1e-8, "edge = {}", w[0]);
    }

    #[test]
    fn test_gaussian_shape() {
        let g = gaussian(51, 10.0).unwrap();
        assert_eq!(g.len(), 51);
        assert!((g[25] - 1.0).abs() < 1e-12);
        // One std from the centre.
        assert!((g[35] - (-0.5f64).exp()).abs() < 1e-12);
        assert!(gaussian(10, 0.0).is_err());
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(window(WindowKind::FlatTop, 0, Symmetry::Periodic).unwrap().is_empty());
        assert_eq!(window(WindowKind::Hann, 1, Symmetry::Periodic).unwrap(), vec![1.0]);
    }
}
