//! Spectral Ratio Between Components

use rustfft::{num_complex::Complex, FftPlanner};
use seismic_record::RecordError;
use serde::Serialize;
use tracing::debug;

use crate::error::SpectralError;

/// Relative floor applied to the reference magnitude before dividing
const REFERENCE_FLOOR: f64 = 1e-12;

/// Per-frequency amplitude ratio and phase difference between two series
#[derive(Debug, Clone, Serialize)]
pub struct SpectralRatio {
    /// Bin frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// `|X| / |Y|` per bin
    pub amplitude_ratio: Vec<f64>,
    /// Phase of X minus phase of Y, degrees in [-180, 180]
    pub phase_difference_deg: Vec<f64>,
}

/// Amplitude ratio and wrapped phase difference of `x` against `y`.
///
/// Reference bins below `max|Y|·1e-12` are floored before dividing; an
/// identically zero reference has no defined ratio and is rejected.
pub(crate) fn spectral_ratio(
    planner: &mut FftPlanner<f64>,
    fs: f64,
    x: &[f64],
    y: &[f64],
) -> Result<SpectralRatio, SpectralError> {
    if x.is_empty() {
        return Err(RecordError::EmptySeries.into());
    }
    if x.len() != y.len() {
        return Err(SpectralError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let n = x.len();
    let fft = planner.plan_fft_forward(n);
    let mut buf_x: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut buf_y: Vec<Complex<f64>> = y.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buf_x);
    fft.process(&mut buf_y);

    let bins = n / 2 + 1;
    let reference_peak = buf_y
        .iter()
        .take(bins)
        .map(|v| v.norm())
        .fold(0.0f64, f64::max);
    if reference_peak == 0.0 {
        return Err(SpectralError::ZeroReference);
    }
    let floor = reference_peak * REFERENCE_FLOOR;

    let mut frequencies_hz = Vec::with_capacity(bins);
    let mut amplitude_ratio = Vec::with_capacity(bins);
    let mut phase_difference_deg = Vec::with_capacity(bins);
    let mut floored = 0usize;
    for k in 0..bins {
        let mag_y = buf_y[k].norm();
        let denominator = if mag_y < floor {
            floored += 1;
            floor
        } else {
            mag_y
        };
        let mut phase = (buf_x[k].arg() - buf_y[k].arg()).to_degrees();
        while phase > 180.0 {
            phase -= 360.0;
        }
        while phase < -180.0 {
            phase += 360.0;
        }
        frequencies_hz.push(k as f64 * fs / n as f64);
        amplitude_ratio.push(buf_x[k].norm() / denominator);
        phase_difference_deg.push(phase);
    }
    if floored > 0 {
        debug!("floored {} near-zero reference bins", floored);
    }

    Ok(SpectralRatio {
        frequencies_hz,
        amplitude_ratio,
        phase_difference_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const FS: f64 = 100.0;

    fn run(x: &[f64], y: &[f64]) -> SpectralRatio {
        let mut planner = FftPlanner::new();
        spectral_ratio(&mut planner, FS, x, y).unwrap()
    }

    fn tone(freq_hz: f64, amplitude: f64, phase_rad: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / FS + phase_rad).sin())
            .collect()
    }

    #[test]
    fn test_amplitude_ratio_at_shared_tone() {
        let n = 1000;
        // 5 Hz falls exactly on a bin at this length and rate.
        let x = tone(5.0, 3.0, 0.0, n);
        let y = tone(5.0, 1.0, 0.0, n);
        let ratio = run(&x, &y);
        let bin = (5.0 * n as f64 / FS).round() as usize;
        assert!(
            (ratio.amplitude_ratio[bin] - 3.0).abs() < 0.01,
            "ratio {} at 5 Hz",
            ratio.amplitude_ratio[bin]
        );
    }

    #[test]
    fn test_phase_difference_quarter_cycle() {
        let n = 1000;
        let x = tone(5.0, 1.0, PI / 2.0, n);
        let y = tone(5.0, 1.0, 0.0, n);
        let ratio = run(&x, &y);
        let bin = (5.0 * n as f64 / FS).round() as usize;
        assert!(
            (ratio.phase_difference_deg[bin] - 90.0).abs() < 1.0,
            "phase {} deg at 5 Hz",
            ratio.phase_difference_deg[bin]
        );
    }

    #[test]
    fn test_phase_stays_wrapped() {
        let n = 512;
        let x = tone(8.0, 1.0, 3.0, n);
        let y = tone(6.0, 1.0, -2.5, n);
        let ratio = run(&x, &y);
        assert!(ratio
            .phase_difference_deg
            .iter()
            .all(|&p| (-180.0..=180.0).contains(&p)));
    }

    #[test]
    fn test_zero_reference_rejected() {
        let mut planner = FftPlanner::new();
        let x = tone(5.0, 1.0, 0.0, 256);
        assert!(matches!(
            spectral_ratio(&mut planner, FS, &x, &[0.0; 256]),
            Err(SpectralError::ZeroReference)
        ));
    }

    #[test]
    fn test_near_zero_bins_are_floored_not_infinite() {
        let n = 1000;
        let x = tone(5.0, 1.0, 0.0, n);
        let y = tone(20.0, 1.0, 0.0, n);
        let ratio = run(&x, &y);
        assert!(ratio.amplitude_ratio.iter().all(|v| v.is_finite()));
    }
}
