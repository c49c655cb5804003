//! Greyscale images and the filters used by the image demo: spline edge
//! detection, FFT convolution and Gaussian blur. Also renders the pressure
//! field of random point sources as image frames.

pub mod convolve;
pub mod field;
pub mod filter;
pub mod spline;

pub use convolve::{fft_convolve, shift_kernel};
pub use field::{point_source_field, FieldParams, Medium, PointSource, PointSourceField};
pub use filter::{gaussian_blur, sepfir2d, spline_edge_filter};
pub use spline::{cspline1d_coefficients, cspline2d};

use crate::error::{Result, SpectraError};
use serde::Serialize;
use std::f64::consts::PI;

/// Row-major greyscale image with `f64` pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<f64>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SpectraError::domain(
                "dimensions",
                format!("image must be non-empty, got {width}x{height}"),
            ));
        }
        if pixels.len() != width * height {
            return Err(SpectraError::domain(
                "pixels",
                format!("expected {} pixels for {width}x{height}, got {}", width * height, pixels.len()),
            ));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Build an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.pixels[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Pixel-wise sum of two images of the same size.
    pub fn add(&self, other: &Image) -> Result<Image> {
        if self.width != other.width || self.height != other.height {
            return Err(SpectraError::domain(
                "dimensions",
                format!(
                    "cannot add {}x{} to {}x{}",
                    other.width, other.height, self.width, self.height
                ),
            ));
        }
        let pixels = self.pixels.iter().zip(&other.pixels).map(|(a, b)| a + b).collect();
        Image::new(self.width, self.height, pixels)
    }

    /// Smallest and largest pixel values.
    pub fn min_max(&self) -> (f64, f64) {
        self.pixels
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }
}

/// Deterministic test scene: a vertical gradient, concentric rings and a
/// bright block with hard edges. Values stay within `0..=255`.
pub fn test_pattern(width: usize, height: usize) -> Result<Image> {
    let (w, h) = (width as f64, height as f64);
    let (cx, cy) = (0.3 * w, 0.4 * h);
    let ring_period = (w.min(h) / 8.0).max(1.0);
    let radius = 0.25 * w.min(h);

    Image::from_fn(width, height, |x, y| {
        let (xf, yf) = (x as f64, y as f64);
        let mut v = 40.0 + 100.0 * yf / h;

        let r = ((xf - cx).powi(2) + (yf - cy).powi(2)).sqrt();
        if r < radius {
            v += 60.0 * (0.5 + 0.5 * (2.0 * PI * r / ring_period).cos());
        }

        if xf >= 0.6 * w && xf < 0.85 * w && yf >= 0.55 * h && yf < 0.8 * h {
            v = 230.0;
        }
        v
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_shape() {
        assert!(Image::new(0, 4, vec![]).is_err());
        assert!(Image::new(2, 2, vec![0.0; 3]).is_err());
        let img = Image::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(img.get(2, 1), 5.0);
        assert_eq!(img.row(1), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_add_requires_matching_size() {
        let a = Image::filled(2, 2, 1.0).unwrap();
        let b = Image::filled(2, 3, 1.0).unwrap();
        assert!(a.add(&b).is_err());
        assert_eq!(a.add(&a).unwrap().pixels(), &[2.0; 4]);
    }

    #[test]
    fn test_pattern_in_range() {
        let img = test_pattern(128, 96).unwrap();
        let (lo, hi) = img.min_max();
        assert!(lo >= 0.0 && hi <= 255.0, "range {lo}..{hi}");
        assert_eq!(img.get(100, 70), 230.0);
    }
}
