//! Four classic 2-D filters applied to a synthetic test scene.

use super::Result;
use crate::render::{ImageFigure, Panel};
use crate::settings::DemoSettings;
use spectra_core::image::{fft_convolve, gaussian_blur, shift_kernel, spline_edge_filter, test_pattern};

/// Side of the square test scene.
pub const SCENE_SIZE: usize = 256;
/// Smoothing weight of the edge-detecting spline.
pub const EDGE_LAMBDA: f64 = 8.0;
pub const BLUR_TAPS: usize = 50;
pub const BLUR_STD: f64 = 10.0;

/// Signal settings do not apply here; the scene is fixed.
pub fn run(_settings: &DemoSettings) -> Result<Vec<Panel>> {
    let scene = test_pattern(SCENE_SIZE, SCENE_SIZE)?;

    let edges = spline_edge_filter(&scene, EDGE_LAMBDA)?;
    let shifted = fft_convolve(&scene, &shift_kernel())?;
    let blurred = gaussian_blur(&scene, BLUR_TAPS, BLUR_STD)?;
    log::debug!(
        "image demo: scene {SCENE_SIZE}x{SCENE_SIZE}, convolution output {}x{}",
        shifted.width(),
        shifted.height()
    );

    Ok(vec![
        ImageFigure::new("Original", scene).into(),
        ImageFigure::new("Spline edge filter", edges).into(),
        ImageFigure::new("FFT convolution (shift)", shifted).into(),
        ImageFigure::new("Gaussian blur", blurred).into(),
    ])
}
