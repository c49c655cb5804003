use super::Image;
use crate::error::Result;
use rustfft::num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

/// Kernel for the shift-invariance demo: two weighted impulses in a 50×50
/// frame, producing a bright copy of the image at the origin and a dimmer
/// copy displaced by (25, 49).
pub fn shift_kernel() -> Image {
    let size = 50;
    let mut pixels = vec![0.0; size * size];
    pixels[0] = 2.0;
    pixels[49 * size + 25] = 1.2;
    Image {
        width: size,
        height: size,
        pixels,
    }
}

/// Transform every row then every column of a `rows × cols` complex grid in place.
fn fft2(
    planner: &mut FftPlanner<f64>,
    grid: &mut [Complex64],
    rows: usize,
    cols: usize,
    direction: FftDirection,
) {
    let row_fft = planner.plan_fft(cols, direction);
    for row in grid.chunks_exact_mut(cols) {
        row_fft.process(row);
    }

    let col_fft = planner.plan_fft(rows, direction);
    let mut column = vec![Complex64::new(0.0, 0.0); rows];
    for c in 0..cols {
        for r in 0..rows {
            column[r] = grid[r * cols + c];
        }
        col_fft.process(&mut column);
        for r in 0..rows {
            grid[r * cols + c] = column[r];
        }
    }
}

fn padded(image: &Image, rows: usize, cols: usize) -> Vec<Complex64> {
    let mut grid = vec![Complex64::new(0.0, 0.0); rows * cols];
    for y in 0..image.height() {
        for (x, &p) in image.row(y).iter().enumerate() {
            grid[y * cols + x] = Complex64::new(p, 0.0);
        }
    }
    grid
}

/// Full 2-D linear convolution computed through the frequency domain.
///
/// The result is `(H + h - 1) × (W + w - 1)`; pixel `(x, y)` of the image
/// convolved with an impulse at `(kx, ky)` lands at `(x + kx, y + ky)`.
pub fn fft_convolve(image: &Image, kernel: &Image) -> Result<Image> {
    let rows = image.height() + kernel.height() - 1;
    let cols = image.width() + kernel.width() - 1;

    let mut planner = FftPlanner::new();
    let mut a = padded(image, rows, cols);
    let mut b = padded(kernel, rows, cols);
    fft2(&mut planner, &mut a, rows, cols, FftDirection::Forward);
    fft2(&mut planner, &mut b, rows, cols, FftDirection::Forward);

    for (x, k) in a.iter_mut().zip(b.iter()) {
        *x *= *k;
    }
    fft2(&mut planner, &mut a, rows, cols, FftDirection::Inverse);

    let scale = 1.0 / (rows * cols) as f64;
    log::debug!(
        "fft_convolve: {}x{} * {}x{} -> {cols}x{rows}",
        image.width(),
        image.height(),
        kernel.width(),
        kernel.height()
    );
    Image::new(cols, rows, a.iter().map(|c| c.re * scale).collect())
}
