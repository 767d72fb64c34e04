//! Processing Errors

use filter_engine::FilterError;
use thiserror::Error;

/// Errors raised by baseline correction and integration
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("signal is empty")]
    EmptySignal,

    #[error("signal length {signal_len} does not match time length {time_len}")]
    LengthMismatch { signal_len: usize, time_len: usize },

    #[error("at least {min} samples are required, got {len}")]
    SignalTooShort { len: usize, min: usize },

    #[error("engine sampling rate {engine_hz} Hz does not match record rate {record_hz} Hz")]
    SamplingRateMismatch { engine_hz: f64, record_hz: f64 },

    #[error("drift-control filter stage failed: {0}")]
    Filter(#[from] FilterError),
}
