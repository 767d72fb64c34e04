//! Record Model Error Types

use thiserror::Error;

/// Errors raised while building or validating record data
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input series has no samples
    #[error("input series is empty")]
    EmptySeries,

    /// Series shorter than the required minimum
    #[error("series has {len} samples, at least {min} required")]
    SeriesTooShort { len: usize, min: usize },

    /// NaN encountered where finite values are required
    #[error("series contains NaN at index {index}")]
    NanValue { index: usize },

    /// Infinity encountered where finite values are required
    #[error("series contains an infinite value at index {index}")]
    InfiniteValue { index: usize },

    /// Series length does not match the record's time vector
    #[error("series length {actual} does not match time vector length {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Time vector must increase strictly
    #[error("time vector is not strictly increasing at index {index}")]
    TimeNotIncreasing { index: usize },

    /// Count buffer cannot be split into three channel blocks
    #[error("count buffer has {len} samples, cannot split into 3 channels")]
    BufferTooSmall { len: usize },

    /// Sampling rate must be a positive finite number
    #[error("sampling rate must be positive, got {rate}")]
    InvalidSamplingRate { rate: f64 },

    /// Component already present in the record
    #[error("component {code} already exists in the record")]
    DuplicateComponent { code: &'static str },
}
