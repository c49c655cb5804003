//! Numerical core: two-tone signal synthesis, spectral estimation by direct
//! FFT, windowed periodogram and Welch averaging, amplitude normalization
//! policies, a handful of illustrative 2-D image filters, and the pressure
//! field of acoustic point sources.
//!
//! Every operation is a pure function of its inputs. Nothing is cached
//! between calls apart from FFT plans.

pub mod dsp;
pub mod error;
pub mod image;
pub mod types;

pub use dsp::fft::{fft_spectrum, next_pow2_len, nextpow2};
pub use dsp::normalize::{peak_normalize, physical_scale, Normalization};
pub use dsp::periodogram::{periodogram, PeriodogramParams};
pub use dsp::synth::{generate, SignalConfig, SignalLength, SynthParams, SynthesizedSignal};
pub use dsp::welch::{welch, WelchParams};
pub use dsp::window::WindowKind;
pub use error::{NormalizationError, Result, SpectraError};
pub use image::{point_source_field, FieldParams, Image, PointSourceField};
pub use types::{Detrend, EstimateKind, Scaling, Sides, SpectralEstimate, SpectrumKind, TimeSeries};
