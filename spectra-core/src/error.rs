//! Error types shared by the numerical core.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, SpectraError>;

/// Errors raised by synthesis, estimation and filtering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectraError {
    /// A numeric argument is outside the domain the operation accepts.
    #[error("invalid {param}: {reason}")]
    Domain { param: &'static str, reason: String },

    /// The FFT backend rejected a buffer.
    #[error("fft failed: {0}")]
    Fft(String),

    /// A normalization policy could not be applied.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl SpectraError {
    pub(crate) fn domain(param: &'static str, reason: impl Into<String>) -> Self {
        SpectraError::Domain {
            param,
            reason: reason.into(),
        }
    }
}

/// Failures of [`peak_normalize`](crate::dsp::normalize::peak_normalize) and
/// [`SpectralEstimate::normalize`](crate::types::SpectralEstimate::normalize).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    /// Every value is zero, so there is no peak to divide by.
    #[error("cannot peak-normalize an all-zero estimate")]
    AllZero,

    /// The maximum is NaN or infinite.
    #[error("cannot peak-normalize: maximum is not finite ({0})")]
    NonFinite(f64),

    /// The maximum is negative, which no magnitude or power estimate produces.
    #[error("cannot peak-normalize: maximum is negative ({0})")]
    NonPositive(f64),

    /// Nothing to normalize.
    #[error("cannot normalize an empty estimate")]
    Empty,

    /// A policy was already applied; peak and physical scaling never compose.
    #[error("estimate is already normalized ({0:?})")]
    AlreadyNormalized(crate::dsp::normalize::Normalization),
}
