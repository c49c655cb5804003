//! Time-harmonic pressure field of monopole point sources in a fluid,
//! sampled on a square grid and rendered as `|Re p|` frames over a fraction
//! of a cycle.
//!
//! Each source of volume velocity `Q` at distance `r` contributes
//!
//! ```text
//! p = -i ρ c k Q e^{-i(ωt + kr)} / (4π r),    k = ω / c
//! ```
//!
//! Distances below half a grid step are clamped there, so a source sitting
//! on a grid point gives a large but finite pixel.

use super::Image;
use crate::dsp::synth::MAX_SAMPLES;
use crate::error::{Result, SpectraError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Density and speed of sound of the propagating fluid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    /// kg/m³
    pub density: f64,
    /// m/s
    pub sound_speed: f64,
}

impl Default for Medium {
    /// Sea water.
    fn default() -> Self {
        Self {
            density: 998.0,
            sound_speed: 1480.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSource {
    pub x: f64,
    pub y: f64,
    /// Volume velocity amplitude in m³/s.
    pub strength: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Source frequency in Hz.
    pub frequency: f64,
    pub sources: usize,
    pub frames: usize,
    /// Pixels along each side of the square grid.
    pub grid: usize,
    /// Coordinate range `(lo, hi)` in metres, shared by both axes.
    pub extent: (f64, f64),
    pub medium: Medium,
    pub seed: Option<u64>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            frequency: 850.0,
            sources: 2,
            frames: 30,
            grid: 256,
            extent: (1.0, 6.0),
            medium: Medium::default(),
            seed: None,
        }
    }
}

impl FieldParams {
    fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(SpectraError::domain(
                "frequency",
                format!("must be positive and finite, got {}", self.frequency),
            ));
        }
        if self.sources == 0 {
            return Err(SpectraError::domain("sources", "need at least one source"));
        }
        if self.frames == 0 {
            return Err(SpectraError::domain("frames", "need at least one frame"));
        }
        if self.grid < 2 {
            return Err(SpectraError::domain(
                "grid",
                format!("need at least 2 pixels per side, got {}", self.grid),
            ));
        }
        let total = self
            .grid
            .checked_mul(self.grid)
            .and_then(|n| n.checked_mul(self.frames));
        if total.map_or(true, |n| n > MAX_SAMPLES) {
            return Err(SpectraError::domain(
                "grid",
                format!(
                    "{} frames of {}x{} exceed {MAX_SAMPLES} pixels",
                    self.frames, self.grid, self.grid
                ),
            ));
        }
        let (lo, hi) = self.extent;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(SpectraError::domain(
                "extent",
                format!("need finite lo < hi, got ({lo}, {hi})"),
            ));
        }
        let Medium { density, sound_speed } = self.medium;
        if !density.is_finite() || density <= 0.0 || !sound_speed.is_finite() || sound_speed <= 0.0 {
            return Err(SpectraError::domain(
                "medium",
                format!("density and sound speed must be positive, got {density}, {sound_speed}"),
            ));
        }
        Ok(())
    }

    fn omega(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    fn wavenumber(&self) -> f64 {
        self.omega() / self.medium.sound_speed
    }

    fn spacing(&self) -> f64 {
        (self.extent.1 - self.extent.0) / (self.grid - 1) as f64
    }

    /// Coordinate of grid index `i` along either axis.
    fn coordinate(&self, i: usize) -> f64 {
        self.extent.0 + i as f64 * self.spacing()
    }
}

/// Sources placed on grid points in the lower-right region of the field
/// (columns `grid/2..2·grid/3`, rows `grid/2..grid`), each with strength
/// `0.05 · U(1, 3)`.
pub fn random_sources(params: &FieldParams, rng: &mut StdRng) -> Vec<PointSource> {
    let g = params.grid;
    let cols = g / 2..(2 * g / 3).max(g / 2 + 1);
    let rows = g / 2..g;
    let strength = Uniform::new(1.0, 3.0);
    (0..params.sources)
        .map(|_| PointSource {
            x: params.coordinate(rng.gen_range(cols.clone())),
            y: params.coordinate(rng.gen_range(rows.clone())),
            strength: 0.05 * strength.sample(rng),
        })
        .collect()
}

/// `frames` instants evenly spread over `[0, frames / (2.5 f)]`, both ends
/// included.
pub fn frame_times(params: &FieldParams) -> Vec<f64> {
    let end = params.frames as f64 / (2.5 * params.frequency);
    if params.frames == 1 {
        return vec![0.0];
    }
    let step = end / (params.frames - 1) as f64;
    (0..params.frames).map(|i| i as f64 * step).collect()
}

/// Complex pressure at `(x, y)` and time `t`, summed over all sources.
pub fn pressure_at(sources: &[PointSource], params: &FieldParams, x: f64, y: f64, t: f64) -> Complex64 {
    let k = params.wavenumber();
    let omega = params.omega();
    let rho_c = params.medium.density * params.medium.sound_speed;
    let min_r = 0.5 * params.spacing();
    sources
        .iter()
        .map(|s| {
            let r = (x - s.x).hypot(y - s.y).max(min_r);
            let amplitude = rho_c * k * s.strength / (4.0 * PI * r);
            Complex64::new(0.0, -amplitude) * Complex64::from_polar(1.0, -(omega * t + k * r))
        })
        .sum()
}

/// Sources and the rendered `|Re p|` frames.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointSourceField {
    pub sources: Vec<PointSource>,
    pub times: Vec<f64>,
    pub frames: Vec<Image>,
}

/// Draw random sources and render one `|Re p|` image per frame time.
pub fn point_source_field(params: &FieldParams) -> Result<PointSourceField> {
    params.validate()?;
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sources = random_sources(params, &mut rng);
    log::debug!(
        "point source field: {} sources at {} Hz, k = {:.3} rad/m",
        sources.len(),
        params.frequency,
        params.wavenumber()
    );

    let times = frame_times(params);
    let frames = times
        .iter()
        .map(|&t| {
            Image::from_fn(params.grid, params.grid, |ix, iy| {
                pressure_at(&sources, params, params.coordinate(ix), params.coordinate(iy), t)
                    .re
                    .abs()
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PointSourceField { sources, times, frames })
}
