//! Event Detection Errors

use thiserror::Error;

/// Errors raised by the event detector
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("empty signal")]
    EmptySignal,

    #[error("invalid sampling rate: {rate} Hz")]
    InvalidSamplingRate { rate: f64 },

    #[error("{name} window of {seconds} s spans no samples")]
    WindowTooShort { name: &'static str, seconds: f64 },

    #[error("STA window ({sta_s} s) must be shorter than LTA window ({lta_s} s)")]
    StaNotShorterThanLta { sta_s: f64, lta_s: f64 },

    #[error("event window around t = {event_time_s} s contains no samples")]
    EmptyEventWindow { event_time_s: f64 },
}
