//! Filter Engine Error Types

use thiserror::Error;

/// Errors raised during filter design or application
#[derive(Debug, Error)]
pub enum FilterError {
    /// Sampling rate must be a positive finite number
    #[error("sampling rate must be positive, got {rate}")]
    InvalidSamplingRate { rate: f64 },

    /// Cutoff frequency must be positive and finite
    #[error("cutoff frequency must be positive, got {cutoff_hz} Hz")]
    InvalidCutoff { cutoff_hz: f64 },

    /// Bandpass corner frequencies out of order
    #[error("bandpass lowcut {lowcut_hz} Hz must be below highcut {highcut_hz} Hz")]
    InvalidBand { lowcut_hz: f64, highcut_hz: f64 },

    /// Input signal has no samples
    #[error("input signal is empty")]
    EmptySignal,

    /// Signal shorter than the forward-backward padding requires
    #[error("signal has {len} samples, zero-phase filtering needs more than {min}")]
    SignalTooShort { len: usize, min: usize },
}
