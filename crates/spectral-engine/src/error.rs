//! Spectral Analysis Errors

use seismic_record::RecordError;
use thiserror::Error;

/// Errors raised by the spectral analysis engine
#[derive(Debug, Error)]
pub enum SpectralError {
    #[error("invalid input series: {0}")]
    Input(#[from] RecordError),

    #[error("signal lengths differ: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("signal variance is zero, cannot normalize")]
    ZeroVariance,

    #[error("reference spectrum is identically zero")]
    ZeroReference,

    #[error("invalid sampling rate: {rate} Hz")]
    InvalidSamplingRate { rate: f64 },

    #[error("segment length must be positive")]
    ZeroSegmentLength,
}
