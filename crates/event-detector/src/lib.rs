//! Seismic Event Detection
//!
//! Finds events in continuous acceleration traces: an STA/LTA energy
//! ratio with edge-triggered scanning, threshold peak picking over the
//! rectified signal, and scalar feature extraction around each trigger.
//! Finding nothing is an empty result, never an error.

mod error;
mod features;
mod peaks;
mod sta_lta;

pub use error::DetectError;
pub use features::{EventFeatures, DEFAULT_FEATURE_WINDOW_S};
pub use peaks::{PeakConfig, Peaks, DEFAULT_MIN_DISTANCE_S};
pub use sta_lta::{StaLtaConfig, StaLtaResult};

/// Event detection engine bound to a sampling rate
pub struct EventDetector {
    fs: f64,
}

impl EventDetector {
    /// Create a detector for signals sampled at `sampling_rate` Hz
    pub fn new(sampling_rate: f64) -> Result<Self, DetectError> {
        if !(sampling_rate > 0.0) || !sampling_rate.is_finite() {
            return Err(DetectError::InvalidSamplingRate {
                rate: sampling_rate,
            });
        }
        Ok(Self { fs: sampling_rate })
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.fs
    }

    /// STA/LTA ratio trigger over the signal energy.
    ///
    /// Returns one trigger per rising crossing of the ratio threshold
    /// plus the smoothed ratio trace.
    pub fn sta_lta(
        &self,
        signal: &[f64],
        config: &StaLtaConfig,
    ) -> Result<StaLtaResult, DetectError> {
        sta_lta::sta_lta(self.fs, signal, config)
    }

    /// Peaks of `|signal|` above a threshold, spaced apart
    pub fn detect_peaks(&self, signal: &[f64], config: &PeakConfig) -> Result<Peaks, DetectError> {
        peaks::detect_peaks(self.fs, signal, config)
    }

    /// Scalar features over a window centered on a trigger time
    pub fn event_features(
        &self,
        signal: &[f64],
        event_time_s: f64,
        window_s: f64,
    ) -> Result<EventFeatures, DetectError> {
        features::event_features(self.fs, signal, event_time_s, window_s)
    }

    /// STA/LTA triggers with features extracted around each one
    pub fn detect_events(
        &self,
        signal: &[f64],
        config: &StaLtaConfig,
        feature_window_s: f64,
    ) -> Result<Vec<EventFeatures>, DetectError> {
        let result = self.sta_lta(signal, config)?;
        result
            .trigger_times_s
            .iter()
            .map(|&t| self.event_features(signal, t, feature_window_s))
            .collect()
    }
}
