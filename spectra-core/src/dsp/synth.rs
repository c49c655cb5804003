//! Two-tone test signal: a fundamental plus a subharmonic at half the
//! frequency and half the amplitude, optionally buried in Gaussian noise.

use crate::error::{Result, SpectraError};
use crate::types::TimeSeries;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tone parameters, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SignalConfig {
    f0: f64,
    amplitude: f64,
}

impl SignalConfig {
    /// `f0` must be positive and finite, `amplitude` non-negative and finite.
    pub fn new(f0: f64, amplitude: f64) -> Result<Self> {
        if !f0.is_finite() || f0 <= 0.0 {
            return Err(SpectraError::domain(
                "f0",
                format!("fundamental frequency must be positive and finite, got {f0}"),
            ));
        }
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(SpectraError::domain(
                "amplitude",
                format!("must be non-negative and finite, got {amplitude}"),
            ));
        }
        Ok(Self { f0, amplitude })
    }

    pub fn f0(&self) -> f64 {
        self.f0
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Subharmonic frequency, `f0 / 2`.
    pub fn subharmonic(&self) -> f64 {
        self.f0 / 2.0
    }
}

/// How long a generated signal is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SignalLength {
    Samples(usize),
    /// Seconds; rounded down to whole samples.
    Duration(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SynthParams {
    pub sample_rate: f64,
    pub length: SignalLength,
    /// Standard deviation of the additive noise; 0 disables it.
    pub noise_std: f64,
    /// Fixed noise seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Largest signal `generate` will allocate (2^28 samples, 2 GiB per copy).
pub const MAX_SAMPLES: usize = 1 << 28;

impl SynthParams {
    fn num_samples(&self) -> Result<usize> {
        let n = match self.length {
            SignalLength::Samples(n) => n,
            SignalLength::Duration(secs) => {
                if !secs.is_finite() || secs < 0.0 {
                    return Err(SpectraError::domain(
                        "duration",
                        format!("must be non-negative and finite, got {secs}"),
                    ));
                }
                let count = (secs * self.sample_rate).floor();
                if count > MAX_SAMPLES as f64 {
                    return Err(SpectraError::domain(
                        "duration",
                        format!("{secs} s at {} Hz exceeds {MAX_SAMPLES} samples", self.sample_rate),
                    ));
                }
                count as usize
            }
        };
        if n == 0 {
            return Err(SpectraError::domain("length", "signal must contain at least one sample"));
        }
        if n > MAX_SAMPLES {
            return Err(SpectraError::domain(
                "length",
                format!("{n} samples exceeds {MAX_SAMPLES}"),
            ));
        }
        Ok(n)
    }
}

/// The same tones with and without noise, on the same sample grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesizedSignal {
    pub clean: TimeSeries,
    pub noisy: TimeSeries,
}

/// Generate `A sin(2π f0 t) + A/2 sin(2π f0/2 t)` and a noisy copy.
///
/// Sampling below Nyquist (`sample_rate <= 2 f0`) is not rejected; it aliases.
pub fn generate(config: &SignalConfig, params: &SynthParams) -> Result<SynthesizedSignal> {
    let sample_rate = params.sample_rate;
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SpectraError::domain(
            "sample_rate",
            format!("must be positive and finite, got {sample_rate}"),
        ));
    }
    if !params.noise_std.is_finite() || params.noise_std < 0.0 {
        return Err(SpectraError::domain(
            "noise_std",
            format!("must be non-negative and finite, got {}", params.noise_std),
        ));
    }
    let n = params.num_samples()?;

    let a1 = config.amplitude;
    let a2 = config.amplitude / 2.0;
    let w1 = 2.0 * PI * config.f0;
    let w2 = 2.0 * PI * config.subharmonic();
    let clean: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate;
            a1 * (w1 * t).sin() + a2 * (w2 * t).sin()
        })
        .collect();

    let noisy = if params.noise_std == 0.0 {
        clean.clone()
    } else {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = Normal::new(0.0, params.noise_std)
            .map_err(|e| SpectraError::domain("noise_std", e.to_string()))?;
        clean.iter().map(|&s| s + noise.sample(&mut rng)).collect()
    };

    Ok(SynthesizedSignal {
        clean: TimeSeries::new(clean, sample_rate)?,
        noisy: TimeSeries::new(noisy, sample_rate)?,
    })
}
