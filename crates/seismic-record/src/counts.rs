//! Raw Count Conversion
//!
//! Turns a decoded instrument count buffer into a calibrated [`Record`].
//! The byte-level container format stays with the external reader; this
//! module handles only the channel split and physical-unit conversion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::component::{Component, ComponentId};
use crate::error::RecordError;
use crate::metadata::RecordMetadata;
use crate::record::Record;

/// Standard gravity used to convert V/g sensitivities to m/s²
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Sampling rate assumed when the source metadata carries none
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 100.0;

/// Per-channel calibration applied during count conversion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelCalibration {
    /// Zero offset in raw counts
    pub zero_offset: f64,
    /// Sensor sensitivity (V/g)
    pub sensitivity: f64,
    /// Recording gain
    pub gain: f64,
}

impl Default for ChannelCalibration {
    fn default() -> Self {
        Self {
            zero_offset: 0.0,
            sensitivity: 1.0,
            gain: 1.0,
        }
    }
}

impl ChannelCalibration {
    fn convert(&self, count: i32) -> f64 {
        (count as f64 - self.zero_offset) * self.sensitivity * self.gain * STANDARD_GRAVITY
    }
}

/// Build a calibrated triaxial record from a decoded count buffer.
///
/// The buffer holds three contiguous equal blocks in E, N, Z order; a
/// remainder that does not divide evenly is dropped. Each count becomes
/// `(count - zero_offset) * sensitivity * gain * 9.81` m/s², and the
/// time vector is `i / sampling_rate`.
pub fn record_from_counts(
    name: &str,
    counts: &[i32],
    sampling_rate: f64,
    calibrations: [ChannelCalibration; 3],
    mut metadata: RecordMetadata,
) -> Result<Record, RecordError> {
    if counts.len() < 3 {
        return Err(RecordError::BufferTooSmall { len: counts.len() });
    }
    if !(sampling_rate > 0.0) || !sampling_rate.is_finite() {
        return Err(RecordError::InvalidSamplingRate {
            rate: sampling_rate,
        });
    }

    let samples = counts.len() / 3;
    let remainder = counts.len() - samples * 3;
    if remainder > 0 {
        debug!("dropping {} trailing samples that do not fill 3 channels", remainder);
    }

    metadata.sampling_rate = sampling_rate;
    let time: Vec<f64> = (0..samples).map(|i| i as f64 / sampling_rate).collect();
    let mut record = Record::new(name, time, metadata)?;

    for (channel, id) in ComponentId::ALL.iter().enumerate() {
        let block = &counts[channel * samples..(channel + 1) * samples];
        let calibration = &calibrations[channel];
        let acceleration: Vec<f64> = block.iter().map(|&c| calibration.convert(c)).collect();
        record.add_component(Component::new(*id, acceleration))?;
    }

    debug!(
        "built record '{}' with {} samples per channel at {} Hz",
        record.name, samples, sampling_rate
    );
    Ok(record)
}
