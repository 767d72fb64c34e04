//! Baseline Correction and Double Integration
//!
//! Converts acceleration histories into velocity and displacement.
//! Trapezoidal integration accumulates drift from sensor offset and
//! finite precision, so every pass is bracketed by polynomial baseline
//! removal and preceded by a low-cutoff highpass on the corrected input.

mod baseline;
mod error;
mod integration;
mod motion;

pub use error::ProcessError;
pub use motion::GroundMotion;

use filter_engine::SignalFilter;
use seismic_record::{FilterSpec, Record};
use tracing::{debug, info};

/// Default polynomial order for baseline fits
pub const DEFAULT_BASELINE_ORDER: usize = 3;
/// Default highpass cutoff when integrating acceleration to velocity
pub const ACC_TO_VEL_CUTOFF_HZ: f64 = 0.1;
/// Default highpass cutoff when integrating velocity to displacement
pub const VEL_TO_DISP_CUTOFF_HZ: f64 = 0.05;

/// Baseline and integration engine bound to a sampling rate
pub struct SignalProcessor {
    fs: f64,
    filter: SignalFilter,
}

impl SignalProcessor {
    /// Create an engine for signals sampled at `sampling_rate` Hz
    pub fn new(sampling_rate: f64) -> Result<Self, ProcessError> {
        let filter = SignalFilter::new(sampling_rate)?;
        Ok(Self {
            fs: sampling_rate,
            filter,
        })
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.fs
    }

    /// Subtract a least-squares polynomial trend of the given order.
    ///
    /// The fit runs over a time axis normalized to [0, 1].
    pub fn remove_baseline(
        &self,
        signal: &[f64],
        poly_order: usize,
    ) -> Result<Vec<f64>, ProcessError> {
        baseline::detrend_polynomial(signal, poly_order)
    }

    /// Integrate one series with drift control.
    ///
    /// Baseline removal on the input, a highpass at `highpass_hz` to
    /// suppress low-frequency drift, trapezoidal integration, and
    /// baseline removal again on the output.
    pub fn integrate(
        &self,
        signal: &[f64],
        time: &[f64],
        highpass_hz: f64,
    ) -> Result<Vec<f64>, ProcessError> {
        check_lengths(signal, time)?;
        let corrected = baseline::detrend_polynomial(signal, DEFAULT_BASELINE_ORDER)?;
        let filtered = self
            .filter
            .apply(&corrected, &FilterSpec::highpass(highpass_hz))?;
        let dt = time[1] - time[0];
        let integrated = integration::trapezoid(&filtered, dt);
        baseline::detrend_polynomial(&integrated, DEFAULT_BASELINE_ORDER)
    }

    /// Integrate acceleration to velocity and displacement.
    ///
    /// Two integration passes with the standard drift cutoffs (0.1 Hz
    /// for acceleration, 0.05 Hz for velocity).
    pub fn process(
        &self,
        acceleration: &[f64],
        time: &[f64],
    ) -> Result<GroundMotion, ProcessError> {
        debug!(
            "integrating {} samples to velocity and displacement",
            acceleration.len()
        );
        let velocity = self.integrate(acceleration, time, ACC_TO_VEL_CUTOFF_HZ)?;
        let displacement = self.integrate(&velocity, time, VEL_TO_DISP_CUTOFF_HZ)?;
        Ok(GroundMotion {
            acceleration: acceleration.to_vec(),
            velocity,
            displacement,
            time: time.to_vec(),
        })
    }

    /// Derive velocity and displacement for every component of a record.
    ///
    /// The engine sampling rate must match the record metadata.
    pub fn process_record(&self, record: &mut Record) -> Result<(), ProcessError> {
        let record_hz = record.metadata.sampling_rate;
        if (record_hz - self.fs).abs() > 1e-8 + 1e-5 * self.fs.abs() {
            return Err(ProcessError::SamplingRateMismatch {
                engine_hz: self.fs,
                record_hz,
            });
        }
        let time = record.time().to_vec();
        for component in record.components_mut() {
            let motion = self.process(component.acceleration(), &time)?;
            component.set_derived_motion(motion.velocity, motion.displacement);
        }
        info!("derived motion computed for record '{}'", record.name);
        Ok(())
    }
}

fn check_lengths(signal: &[f64], time: &[f64]) -> Result<(), ProcessError> {
    if signal.is_empty() {
        return Err(ProcessError::EmptySignal);
    }
    if signal.len() != time.len() {
        return Err(ProcessError::LengthMismatch {
            signal_len: signal.len(),
            time_len: time.len(),
        });
    }
    if time.len() < 2 {
        return Err(ProcessError::SignalTooShort {
            len: time.len(),
            min: 2,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seismic_record::{Component, ComponentId, RecordMetadata};
    use std::f64::consts::PI;

    const FS: f64 = 100.0;

    fn make_time(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / FS).collect()
    }

    /// Decaying multi-tone burst resembling a strong-motion trace
    fn synthetic_acceleration(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 / FS;
                let envelope = (-(t - 20.0).abs() * 0.15).exp();
                envelope
                    * ((2.0 * PI * 1.5 * t).sin()
                        + 0.6 * (2.0 * PI * 3.2 * t).sin()
                        + 0.3 * (2.0 * PI * 5.0 * t).sin())
            })
            .collect()
    }

    fn pearson(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len() as f64;
        let mx = x.iter().sum::<f64>() / n;
        let my = y.iter().sum::<f64>() / n;
        let mut cov = 0.0;
        let mut vx = 0.0;
        let mut vy = 0.0;
        for (&a, &b) in x.iter().zip(y.iter()) {
            cov += (a - mx) * (b - my);
            vx += (a - mx) * (a - mx);
            vy += (b - my) * (b - my);
        }
        cov / (vx.sqrt() * vy.sqrt())
    }

    #[test]
    fn test_integrate_then_differentiate_recovers_shape() {
        let n = 6000;
        let acc = synthetic_acceleration(n);
        let time = make_time(n);
        let processor = SignalProcessor::new(FS).unwrap();
        let velocity = processor.integrate(&acc, &time, ACC_TO_VEL_CUTOFF_HZ).unwrap();

        let dt = 1.0 / FS;
        let differentiated: Vec<f64> = (1..n - 1)
            .map(|i| (velocity[i + 1] - velocity[i - 1]) / (2.0 * dt))
            .collect();
        let r = pearson(&differentiated, &acc[1..n - 1]);
        assert!(r > 0.5, "correlation {} too low", r);
    }

    #[test]
    fn test_process_produces_matching_lengths() {
        let n = 2000;
        let acc = synthetic_acceleration(n);
        let time = make_time(n);
        let processor = SignalProcessor::new(FS).unwrap();
        let motion = processor.process(&acc, &time).unwrap();
        assert_eq!(motion.acceleration.len(), n);
        assert_eq!(motion.velocity.len(), n);
        assert_eq!(motion.displacement.len(), n);
        assert_eq!(motion.time.len(), n);
        assert!(motion.pgv() > 0.0);
        assert!(motion.pgd() > 0.0);
    }

    #[test]
    fn test_dc_offset_suppressed() {
        // A constant offset is sensor bias, not motion; it must not
        // integrate into a runaway velocity ramp.
        let n = 3000;
        let acc = vec![0.5; n];
        let time = make_time(n);
        let processor = SignalProcessor::new(FS).unwrap();
        let velocity = processor.integrate(&acc, &time, ACC_TO_VEL_CUTOFF_HZ).unwrap();
        let peak = velocity.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        let naive_ramp_end = 0.5 * (n as f64 / FS);
        assert!(peak < naive_ramp_end * 0.01, "drift peak {}", peak);
    }

    #[test]
    fn test_remove_baseline_delegates() {
        let processor = SignalProcessor::new(FS).unwrap();
        let drift: Vec<f64> = (0..100).map(|i| 1.0 + i as f64 * 0.02).collect();
        let corrected = processor.remove_baseline(&drift, 3).unwrap();
        let peak = corrected.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(peak < 1e-8);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let processor = SignalProcessor::new(FS).unwrap();
        let signal = vec![0.0; 100];
        let time = make_time(99);
        assert!(matches!(
            processor.integrate(&signal, &time, 0.1),
            Err(ProcessError::LengthMismatch {
                signal_len: 100,
                time_len: 99
            })
        ));
    }

    #[test]
    fn test_rejects_empty_signal() {
        let processor = SignalProcessor::new(FS).unwrap();
        assert!(matches!(
            processor.process(&[], &[]),
            Err(ProcessError::EmptySignal)
        ));
    }

    #[test]
    fn test_process_record_writes_derived_motion() {
        let n = 2000;
        let time = make_time(n);
        let metadata = RecordMetadata {
            sampling_rate: FS,
            ..RecordMetadata::default()
        };
        let mut record = Record::new("shake", time, metadata).unwrap();
        record
            .add_component(Component::new(ComponentId::East, synthetic_acceleration(n)))
            .unwrap();
        record
            .add_component(Component::new(ComponentId::North, synthetic_acceleration(n)))
            .unwrap();

        let processor = SignalProcessor::new(FS).unwrap();
        processor.process_record(&mut record).unwrap();

        for component in record.components() {
            assert_eq!(component.velocity().unwrap().len(), n);
            assert_eq!(component.displacement().unwrap().len(), n);
            assert!(component.pgv().unwrap() > 0.0);
            assert!(component.pgd().unwrap() > 0.0);
        }
    }

    #[test]
    fn test_process_record_rejects_rate_mismatch() {
        let time = make_time(2000);
        let metadata = RecordMetadata {
            sampling_rate: 200.0,
            ..RecordMetadata::default()
        };
        let mut record = Record::new("shake", time, metadata).unwrap();
        let processor = SignalProcessor::new(FS).unwrap();
        assert!(matches!(
            processor.process_record(&mut record),
            Err(ProcessError::SamplingRateMismatch { .. })
        ));
    }
}
