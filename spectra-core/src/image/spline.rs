//! Cubic B-spline coefficients by recursive filtering, with mirror-symmetric
//! boundaries.
//!
//! The interpolating spline uses half-sample symmetry: the signal and its
//! coefficients extend as `c[-1] = c[0]` and `c[n] = c[n-1]`. Evaluating the
//! edge knots with that extension reproduces the samples exactly. A
//! whole-sample mirror (`c[-1] = c[1]`) does not.
//!
//! `lambda <= 1/144` gives the interpolating spline (single real pole
//! `z = √3 - 2`). Larger `lambda` gives a smoothing spline whose
//! second-order recursion has complex poles `ρ e^{±iω}`.

use super::Image;
use crate::error::{Result, SpectraError};

/// Below this smoothing weight the smoothing recursion degenerates to interpolation.
const MIN_SMOOTHING: f64 = 1.0 / 144.0;

/// Cubic B-spline coefficients of a 1-D signal.
pub fn cspline1d_coefficients(signal: &[f64], lambda: f64) -> Result<Vec<f64>> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(SpectraError::domain(
            "lambda",
            format!("smoothing must be non-negative and finite, got {lambda}"),
        ));
    }
    if signal.len() <= 1 {
        return Ok(signal.to_vec());
    }
    if lambda <= MIN_SMOOTHING {
        Ok(interpolating_coefficients(signal))
    } else {
        Ok(smoothing_coefficients(signal, lambda))
    }
}

/// Apply [`cspline1d_coefficients`] along every row, then every column.
pub fn cspline2d(image: &Image, lambda: f64) -> Result<Image> {
    let (w, h) = (image.width(), image.height());
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..h {
        pixels.extend(cspline1d_coefficients(image.row(y), lambda)?);
    }

    let mut column = vec![0.0; h];
    for x in 0..w {
        for y in 0..h {
            column[y] = pixels[y * w + x];
        }
        let coeffs = cspline1d_coefficients(&column, lambda)?;
        for (y, c) in coeffs.into_iter().enumerate() {
            pixels[y * w + x] = c;
        }
    }
    Image::new(w, h, pixels)
}

fn interpolating_coefficients(signal: &[f64]) -> Vec<f64> {
    let z = 3f64.sqrt() - 2.0;
    let n = signal.len();

    // Causal pass, started from the mirror-extended signal.
    let mut causal = vec![0.0; n];
    let mut power = 1.0;
    let mut start = 0.0;
    for &s in signal {
        start += power * s;
        power *= z;
    }
    causal[0] = signal[0] + z * start;
    for k in 1..n {
        causal[k] = signal[k] + z * causal[k - 1];
    }

    // Anti-causal pass.
    let mut out = vec![0.0; n];
    out[n - 1] = z / (z - 1.0) * causal[n - 1];
    for k in (0..n - 1).rev() {
        out[k] = z * (out[k + 1] - causal[k]);
    }
    for c in out.iter_mut() {
        *c *= 6.0;
    }
    out
}

/// Pole radius and angle of the smoothing-spline recursion.
fn smoothing_poles(lambda: f64) -> (f64, f64) {
    let root = (3.0 + 144.0 * lambda).sqrt();
    let xi = 1.0 - 96.0 * lambda + 24.0 * lambda * root;
    let omega = (144.0 * lambda - 1.0).sqrt().atan2(xi.sqrt());
    let rho = (24.0 * lambda - 1.0 - xi.sqrt()) / (24.0 * lambda)
        * ((48.0 * lambda + 24.0 * lambda * root) / xi).sqrt();
    (rho, omega)
}

fn smoothing_coefficients(signal: &[f64], lambda: f64) -> Vec<f64> {
    let (rho, omega) = smoothing_poles(lambda);
    let cs = 1.0 - 2.0 * rho * omega.cos() + rho * rho;
    let n = signal.len();
    let a1 = 2.0 * rho * omega.cos();
    let a2 = rho * rho;

    // Impulse response of the causal section.
    let hc = |k: isize| -> f64 {
        if k < 0 {
            0.0
        } else {
            cs / omega.sin() * rho.powi(k as i32) * (omega * (k + 1) as f64).sin()
        }
    };
    // Impulse response of the full symmetric filter.
    let c0 = cs * cs * (1.0 + rho * rho)
        / (1.0 - rho * rho)
        / (1.0 - 2.0 * rho * rho * (2.0 * omega).cos() + rho.powi(4));
    let gamma = (1.0 - rho * rho) / (1.0 + rho * rho) / omega.tan();
    let hs = |k: isize| -> f64 {
        let ak = k.unsigned_abs() as f64;
        c0 * rho.powf(ak) * ((omega * ak).cos() + gamma * (omega * ak).sin())
    };

    let mut causal = vec![0.0; n];
    causal[0] = hc(0) * signal[0]
        + signal
            .iter()
            .enumerate()
            .map(|(k, &s)| hc(k as isize + 1) * s)
            .sum::<f64>();
    causal[1] = hc(0) * signal[0]
        + hc(1) * signal[1]
        + signal
            .iter()
            .enumerate()
            .map(|(k, &s)| hc(k as isize + 2) * s)
            .sum::<f64>();
    for k in 2..n {
        causal[k] = cs * signal[k] + a1 * causal[k - 1] - a2 * causal[k - 2];
    }

    let mut out = vec![0.0; n];
    out[n - 1] = signal
        .iter()
        .rev()
        .enumerate()
        .map(|(k, &s)| (hs(k as isize) + hs(k as isize + 1)) * s)
        .sum();
    out[n - 2] = signal
        .iter()
        .rev()
        .enumerate()
        .map(|(k, &s)| (hs(k as isize - 1) + hs(k as isize + 2)) * s)
        .sum();
    for k in (0..n.saturating_sub(2)).rev() {
        out[k] = cs * causal[k] + a1 * out[k + 1] - a2 * out[k + 2];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate the spline at the knots: (c[k-1] + 4 c[k] + c[k+1]) / 6.
    fn reconstruct(coeffs: &[f64], k: usize) -> f64 {
        (coeffs[k - 1] + 4.0 * coeffs[k] + coeffs[k + 1]) / 6.0
    }

    #[test]
    fn test_interpolating_spline_passes_through_samples() {
        let signal: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).sin() * 5.0 + 1.0).collect();
        let coeffs = cspline1d_coefficients(&signal, 0.0).unwrap();
        for k in 1..39 {
            let err = (reconstruct(&coeffs, k) - signal[k]).abs();
            assert!(err < 1e-9, "sample {k}: error {err}");
        }
    }

    #[test]
    fn test_interpolating_edges_use_half_sample_extension() {
        let signal: Vec<f64> = (0..40).map(|i| (i as f64 * 0.3).sin() * 5.0 + 1.0).collect();
        let c = cspline1d_coefficients(&signal, 0.0).unwrap();
        let n = c.len();
        let first = (5.0 * c[0] + c[1]) / 6.0;
        let last = (c[n - 2] + 5.0 * c[n - 1]) / 6.0;
        assert!((first - signal[0]).abs() < 1e-9, "first knot {first} vs {}", signal[0]);
        assert!((last - signal[n - 1]).abs() < 1e-9, "last knot {last} vs {}", signal[n - 1]);
    }

    #[test]
    fn test_constant_is_preserved() {
        let signal = vec![5.0; 48];
        for lambda in [0.0, 0.5, 8.0] {
            let coeffs = cspline1d_coefficients(&signal, lambda).unwrap();
            for (k, c) in coeffs.iter().enumerate() {
                assert!((c - 5.0).abs() < 1e-3, "lambda {lambda}, coeff {k} = {c}");
            }
        }
    }

    #[test]
    fn test_smoothing_reduces_roughness() {
        // Alternating signal is pure high frequency: smoothing should crush it.
        let signal: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let interp = cspline1d_coefficients(&signal, 0.0).unwrap();
        let smooth = cspline1d_coefficients(&signal, 8.0).unwrap();
        let energy = |c: &[f64]| c[16..48].iter().map(|v| v * v).sum::<f64>();
        assert!(energy(&smooth) < energy(&interp) * 1e-2);
    }

    #[test]
    fn test_poles_inside_unit_circle() {
        let (rho, omega) = smoothing_poles(8.0);
        assert!(rho > 0.0 && rho < 1.0, "rho {rho}");
        assert!(omega > 0.0 && omega < std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_short_and_invalid_inputs() {
        assert_eq!(cspline1d_coefficients(&[3.0], 8.0).unwrap(), vec![3.0]);
        assert!(cspline1d_coefficients(&[], 0.0).unwrap().is_empty());
        assert!(cspline1d_coefficients(&[1.0, 2.0], -1.0).is_err());
        assert_eq!(cspline1d_coefficients(&[1.0, 2.0], 8.0).unwrap().len(), 2);
    }
}
