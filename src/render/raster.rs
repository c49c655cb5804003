use super::colors::{level_to_greyscale, shade_char};
use spectra_core::Image;
use std::io::{self, Write};

/// 8-bit greyscale pixels, row-major, row 0 at the top.
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Map an image's full value range linearly onto 0-255.
pub fn rasterize(image: &Image) -> Raster {
    let (lo, hi) = image.min_max();
    Raster {
        width: image.width(),
        height: image.height(),
        pixels: image
            .pixels()
            .iter()
            .map(|&v| level_to_greyscale(v, lo, hi))
            .collect(),
    }
}

/// Write a binary PGM (P5).
pub fn write_pgm<W: Write>(raster: &Raster, out: &mut W) -> io::Result<()> {
    write!(out, "P5\n{} {}\n255\n", raster.width, raster.height)?;
    out.write_all(&raster.pixels)
}

/// Downsample to at most `max_cols` characters wide using shade characters.
///
/// Terminal cells are about twice as tall as wide, so each text row covers
/// two raster rows per column step.
pub fn shade_lines(raster: &Raster, max_cols: usize) -> Vec<String> {
    if raster.width == 0 || raster.height == 0 || max_cols == 0 {
        return Vec::new();
    }
    let step = raster.width.div_ceil(max_cols).max(1);
    let row_step = step * 2;
    (0..raster.height)
        .step_by(row_step)
        .map(|y0| {
            (0..raster.width)
                .step_by(step)
                .map(|x0| {
                    let mut sum = 0u32;
                    let mut count = 0u32;
                    for y in y0..(y0 + row_step).min(raster.height) {
                        for x in x0..(x0 + step).min(raster.width) {
                            sum += raster.pixels[y * raster.width + x] as u32;
                            count += 1;
                        }
                    }
                    shade_char((sum / count) as u8)
                })
                .collect()
        })
        .collect()
}
