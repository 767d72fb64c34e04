//! Frequency Response Evaluation

use rustfft::num_complex::Complex;
use serde::Serialize;
use std::f64::consts::PI;

use crate::design::BandCoefficients;

const GRID_POINTS: usize = 512;

/// Magnitude response sampled on a uniform grid from DC to Nyquist
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyResponse {
    /// Grid frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Magnitude gain at each grid frequency
    pub magnitude: Vec<f64>,
}

/// Evaluate `|B(z)/A(z)|` on a 512-point grid over `[0, Nyquist)`
pub(crate) fn evaluate(coefficients: &BandCoefficients, fs: f64) -> FrequencyResponse {
    let mut frequencies_hz = Vec::with_capacity(GRID_POINTS);
    let mut magnitude = Vec::with_capacity(GRID_POINTS);
    for k in 0..GRID_POINTS {
        let omega = PI * k as f64 / GRID_POINTS as f64;
        let z = Complex::from_polar(1.0, -omega);
        let num = horner(&coefficients.b, z);
        let den = horner(&coefficients.a, z);
        frequencies_hz.push(omega * fs / (2.0 * PI));
        magnitude.push((num / den).norm());
    }
    FrequencyResponse {
        frequencies_hz,
        magnitude,
    }
}

/// Evaluate a polynomial in `z^-1` at a point on the unit circle
fn horner(poly: &[f64], z: Complex<f64>) -> Complex<f64> {
    let mut acc = Complex::new(0.0, 0.0);
    for &c in poly.iter().rev() {
        acc = acc * z + c;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignalFilter;
    use seismic_record::FilterSpec;

    #[test]
    fn test_grid_spans_dc_to_nyquist() {
        let filter = SignalFilter::new(200.0).unwrap();
        let resp = filter
            .frequency_response(&FilterSpec::lowpass(20.0))
            .unwrap();
        assert_eq!(resp.frequencies_hz.len(), 512);
        assert_eq!(resp.magnitude.len(), 512);
        assert_eq!(resp.frequencies_hz[0], 0.0);
        let last = *resp.frequencies_hz.last().unwrap();
        assert!(last < 100.0 && last > 99.0);
    }

    #[test]
    fn test_lowpass_magnitude_profile() {
        let filter = SignalFilter::new(100.0).unwrap();
        let resp = filter
            .frequency_response(&FilterSpec::lowpass(10.0))
            .unwrap();
        // Unity in the passband, half power at the cutoff, decaying after.
        assert!((resp.magnitude[0] - 1.0).abs() < 1e-9);
        let cutoff_bin = (10.0 / 50.0 * 512.0) as usize;
        let at_cutoff = resp.magnitude[cutoff_bin];
        assert!((at_cutoff - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.02);
        assert!(resp.magnitude[400] < 0.05);
    }

    #[test]
    fn test_highpass_magnitude_rises() {
        let filter = SignalFilter::new(100.0).unwrap();
        let resp = filter
            .frequency_response(&FilterSpec::highpass(10.0))
            .unwrap();
        assert!(resp.magnitude[0] < 1e-9);
        assert!((resp.magnitude[450] - 1.0).abs() < 0.02);
    }
}
