//! Butterworth Filter Engine
//!
//! Designs digital Butterworth filters (lowpass, highpass, bandpass),
//! applies them with zero phase delay, and evaluates their frequency
//! response. Application is forward-backward and therefore non-causal;
//! suitable for offline record processing, not real-time streams.

mod design;
mod error;
mod response;
mod zero_phase;

pub use design::BandCoefficients;
pub use error::FilterError;
pub use response::FrequencyResponse;
pub use zero_phase::detrend_linear;

use seismic_record::FilterSpec;
use tracing::debug;

/// Butterworth filter engine bound to a sampling rate
pub struct SignalFilter {
    fs: f64,
}

impl SignalFilter {
    /// Create an engine for signals sampled at `sampling_rate` Hz
    pub fn new(sampling_rate: f64) -> Result<Self, FilterError> {
        if !(sampling_rate > 0.0) || !sampling_rate.is_finite() {
            return Err(FilterError::InvalidSamplingRate {
                rate: sampling_rate,
            });
        }
        Ok(Self { fs: sampling_rate })
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.fs
    }

    /// Design transfer-function coefficients for a filter specification
    pub fn design(&self, spec: &FilterSpec) -> Result<BandCoefficients, FilterError> {
        design::butterworth(self.fs, spec)
    }

    /// Filter a signal with zero phase delay.
    ///
    /// Removes the linear trend, then runs the designed filter forward
    /// and backward over an odd-extended copy of the signal. The
    /// effective attenuation is double the design order.
    pub fn apply(&self, signal: &[f64], spec: &FilterSpec) -> Result<Vec<f64>, FilterError> {
        if signal.is_empty() {
            return Err(FilterError::EmptySignal);
        }
        let coefficients = self.design(spec)?;
        let detrended = zero_phase::detrend_linear(signal);
        debug!(
            "applying {} filter (order {}) to {} samples",
            spec.kind_name(),
            spec.order(),
            signal.len()
        );
        zero_phase::filtfilt(&coefficients.b, &coefficients.a, &detrended)
    }

    /// Magnitude response of the designed filter on a 512-point grid
    pub fn frequency_response(&self, spec: &FilterSpec) -> Result<FrequencyResponse, FilterError> {
        let coefficients = self.design(spec)?;
        Ok(response::evaluate(&coefficients, self.fs))
    }
}
