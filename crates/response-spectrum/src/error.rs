//! Response Spectrum Errors

use thiserror::Error;

/// Errors raised by the response spectrum solver
#[derive(Debug, Error)]
pub enum SpectrumError {
    #[error("empty acceleration signal")]
    EmptySignal,

    #[error("signal and time lengths differ: {signal_len} vs {time_len}")]
    LengthMismatch { signal_len: usize, time_len: usize },

    #[error("time vector too short: {len} samples, need at least 2")]
    TimeTooShort { len: usize },

    #[error("invalid damping ratio: {value}")]
    InvalidDamping { value: f64 },

    #[error("invalid natural period at index {index}: {value}")]
    InvalidPeriod { index: usize, value: f64 },

    #[error("empty period grid")]
    EmptyPeriods,

    #[error("computation cancelled")]
    Cancelled,
}
