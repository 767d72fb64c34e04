//! Event Feature Extraction

use serde::Serialize;

use crate::error::DetectError;

/// Default analysis window around a trigger, seconds
pub const DEFAULT_FEATURE_WINDOW_S: f64 = 5.0;

/// Scalar characterization of one detected event
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventFeatures {
    /// Trigger time the window is centered on, seconds
    pub event_time_s: f64,
    /// Peak absolute amplitude inside the window
    pub peak_amplitude: f64,
    /// Root mean square of the windowed segment
    pub rms: f64,
    /// Actual window duration after boundary clamping, seconds
    pub duration_s: f64,
    /// Sum of squared samples
    pub energy: f64,
    /// Sign changes inside the window
    pub zero_crossings: usize,
}

/// Features over a symmetric window centered on the trigger.
///
/// The window is clamped to the signal bounds, so events near either
/// edge are characterized over what remains.
pub(crate) fn event_features(
    fs: f64,
    signal: &[f64],
    event_time_s: f64,
    window_s: f64,
) -> Result<EventFeatures, DetectError> {
    if signal.is_empty() {
        return Err(DetectError::EmptySignal);
    }
    if !event_time_s.is_finite() || event_time_s < 0.0 {
        return Err(DetectError::EmptyEventWindow { event_time_s });
    }
    let event_idx = (event_time_s * fs) as i64;
    let half = ((window_s * fs) as i64) / 2;
    let start = (event_idx - half).max(0) as usize;
    let end = ((event_idx + half) as usize).min(signal.len());
    if start >= end {
        return Err(DetectError::EmptyEventWindow { event_time_s });
    }
    let segment = &signal[start..end];

    let peak_amplitude = segment.iter().map(|v| v.abs()).fold(0.0f64, f64::max);
    let energy: f64 = segment.iter().map(|v| v * v).sum();
    let rms = (energy / segment.len() as f64).sqrt();
    let zero_crossings = segment
        .windows(2)
        .filter(|pair| pair[0].is_sign_negative() != pair[1].is_sign_negative())
        .count();

    Ok(EventFeatures {
        event_time_s,
        peak_amplitude,
        rms,
        duration_s: segment.len() as f64 / fs,
        energy,
        zero_crossings,
    })
}
