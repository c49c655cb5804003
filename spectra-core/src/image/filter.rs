use super::spline::cspline2d;
use super::Image;
use crate::dsp::window::gaussian;
use crate::error::{Result, SpectraError};

/// Second-difference kernel used by the spline edge filter.
const SECOND_DIFFERENCE: [f64; 3] = [1.0, -2.0, 1.0];

/// Reflect an out-of-range index back into `0..len` (`x[-k] = x[k]`).
fn mirror_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let mut j = i.rem_euclid(period);
    if j >= len as isize {
        j = period - j;
    }
    j as usize
}

/// Convolve `input` with a centred kernel, mirroring at the edges.
fn convolve_mirror(input: &[f64], kernel: &[f64], out: &mut [f64]) {
    let centre = (kernel.len() / 2) as isize;
    let len = input.len();
    for (i, o) in out.iter_mut().enumerate() {
        *o = kernel
            .iter()
            .enumerate()
            .map(|(k, &h)| h * input[mirror_index(i as isize + centre - k as isize, len)])
            .sum();
    }
}

/// Separable 2-D FIR filter.
///
/// `row_kernel` runs along each row (horizontally), `col_kernel` along each
/// column. Kernels are centred on the output pixel; the image is extended by
/// mirror symmetry. Output has the input's size.
pub fn sepfir2d(image: &Image, row_kernel: &[f64], col_kernel: &[f64]) -> Result<Image> {
    if row_kernel.is_empty() || col_kernel.is_empty() {
        return Err(SpectraError::domain("kernel", "filter kernels must not be empty"));
    }
    let (w, h) = (image.width(), image.height());

    let mut rows = vec![0.0; w * h];
    for y in 0..h {
        convolve_mirror(image.row(y), row_kernel, &mut rows[y * w..(y + 1) * w]);
    }

    let mut out = vec![0.0; w * h];
    let mut column = vec![0.0; h];
    let mut filtered = vec![0.0; h];
    for x in 0..w {
        for y in 0..h {
            column[y] = rows[y * w + x];
        }
        convolve_mirror(&column, col_kernel, &mut filtered);
        for y in 0..h {
            out[y * w + x] = filtered[y];
        }
    }
    Image::new(w, h, out)
}

/// Edge map from the second derivative of a cubic-spline fit.
///
/// Sum of the horizontal and vertical second differences of the spline
/// coefficients; `lambda` controls smoothing (0 interpolates). The second
/// differences use the whole-sample mirror of [`sepfir2d`], not the spline's
/// half-sample extension, so the outermost row and column of the map are
/// approximate.
pub fn spline_edge_filter(image: &Image, lambda: f64) -> Result<Image> {
    let coeffs = cspline2d(image, lambda)?;
    let horizontal = sepfir2d(&coeffs, &SECOND_DIFFERENCE, &[1.0])?;
    let vertical = sepfir2d(&coeffs, &[1.0], &SECOND_DIFFERENCE)?;
    horizontal.add(&vertical)
}

/// Separable Gaussian blur with a `taps`-long kernel of standard deviation `std`.
///
/// The kernel peaks at 1 and is not normalized, so the image gain is
/// `(sum of taps)^2`.
pub fn gaussian_blur(image: &Image, taps: usize, std: f64) -> Result<Image> {
    if taps == 0 {
        return Err(SpectraError::domain("taps", "gaussian kernel needs at least one tap"));
    }
    let kernel = gaussian(taps, std)?;
    sepfir2d(image, &kernel, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_index() {
        assert_eq!(mirror_index(-1, 5), 1);
        assert_eq!(mirror_index(-2, 5), 2);
        assert_eq!(mirror_index(5, 5), 3);
        assert_eq!(mirror_index(6, 5), 2);
        assert_eq!(mirror_index(3, 5), 3);
        assert_eq!(mirror_index(-7, 1), 0);
    }

    #[test]
    fn test_identity_kernel() {
        let img = Image::from_fn(5, 4, |x, y| (x * 10 + y) as f64).unwrap();
        assert_eq!(sepfir2d(&img, &[1.0], &[1.0]).unwrap(), img);
    }

    #[test]
    fn test_blur_of_constant_scales_by_kernel_mass() {
        let img = Image::filled(20, 20, 2.0).unwrap();
        let kernel = gaussian(7, 1.5).unwrap();
        let mass: f64 = kernel.iter().sum();
        let out = gaussian_blur(&img, 7, 1.5).unwrap();
        for &p in out.pixels() {
            assert!((p - 2.0 * mass * mass).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizontal_second_difference() {
        // Quadratic along x: second difference is the constant 2.
        let img = Image::from_fn(10, 3, |x, _| (x * x) as f64).unwrap();
        let out = sepfir2d(&img, &SECOND_DIFFERENCE, &[1.0]).unwrap();
        for y in 0..3 {
            for x in 1..9 {
                assert!((out.get(x, y) - 2.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_edge_filter_flat_on_ramp_interior() {
        let img = Image::from_fn(64, 64, |x, y| x as f64 + 2.0 * y as f64).unwrap();
        let edges = spline_edge_filter(&img, 0.0).unwrap();
        for y in 16..48 {
            for x in 16..48 {
                assert!(edges.get(x, y).abs() < 1e-6, "({x},{y}) = {}", edges.get(x, y));
            }
        }
    }

    #[test]
    fn test_edge_filter_finds_step() {
        let img = Image::from_fn(48, 48, |x, _| if x < 24 { 0.0 } else { 100.0 }).unwrap();
        let edges = spline_edge_filter(&img, 8.0).unwrap();
        let at_step = edges.get(23, 24).abs().max(edges.get(24, 24).abs());
        let far = edges.get(4, 24).abs();
        assert!(at_step > 1.0, "step response {at_step}");
        assert!(far < at_step * 1e-2, "far response {far}");
    }

    #[test]
    fn test_empty_kernel_rejected() {
        let img = Image::filled(4, 4, 1.0).unwrap();
        assert!(sepfir2d(&img, &[], &[1.0]).is_err());
        assert!(gaussian_blur(&img, 0, 1.0).is_err());
    }
}
