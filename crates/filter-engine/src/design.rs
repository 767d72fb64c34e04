//! Butterworth Transfer-Function Design
//!
//! Analog prototype poles, band transform, bilinear mapping, and
//! expansion into real polynomial coefficients.

use rustfft::num_complex::Complex;
use serde::Serialize;
use std::f64::consts::PI;
use tracing::warn;

use crate::error::FilterError;
use seismic_record::FilterSpec;

/// Digital filter transfer-function coefficients, `a[0]` normalized to 1
#[derive(Debug, Clone, Serialize)]
pub struct BandCoefficients {
    /// Numerator coefficients
    pub b: Vec<f64>,
    /// Denominator coefficients
    pub a: Vec<f64>,
}

/// Band shape with cutoffs normalized by the Nyquist frequency
enum Band {
    Low(f64),
    High(f64),
    Pass(f64, f64),
}

/// Design a digital Butterworth filter for `spec` at sampling rate `fs`
pub(crate) fn butterworth(fs: f64, spec: &FilterSpec) -> Result<BandCoefficients, FilterError> {
    let order = effective_order(spec.order());
    let band = match *spec {
        FilterSpec::Lowpass { cutoff_hz, .. } => Band::Low(normalized_cutoff(fs, cutoff_hz)?),
        FilterSpec::Highpass { cutoff_hz, .. } => Band::High(normalized_cutoff(fs, cutoff_hz)?),
        FilterSpec::Bandpass {
            lowcut_hz,
            highcut_hz,
            ..
        } => {
            let low = normalized_cutoff(fs, lowcut_hz)?;
            let high = normalized_cutoff(fs, highcut_hz)?;
            if low >= high {
                return Err(FilterError::InvalidBand {
                    lowcut_hz,
                    highcut_hz,
                });
            }
            Band::Pass(low, high)
        }
    };
    Ok(design_digital(order, band))
}

/// Coerce a zero order to the safe default
fn effective_order(order: u32) -> u32 {
    if order == 0 {
        warn!("filter order 0 is invalid, using default order 4");
        FilterSpec::DEFAULT_ORDER
    } else {
        order
    }
}

/// Normalize a cutoff by Nyquist, clamping values at or above it
fn normalized_cutoff(fs: f64, cutoff_hz: f64) -> Result<f64, FilterError> {
    if !(cutoff_hz > 0.0) || !cutoff_hz.is_finite() {
        return Err(FilterError::InvalidCutoff { cutoff_hz });
    }
    let nyquist = 0.5 * fs;
    let wn = cutoff_hz / nyquist;
    if wn >= 1.0 {
        warn!(
            "cutoff {} Hz is at or above Nyquist ({} Hz), clamping to 0.99 normalized",
            cutoff_hz, nyquist
        );
        Ok(0.99)
    } else {
        Ok(wn)
    }
}

/// Butterworth analog prototype poles on the left half of the unit circle
fn prototype_poles(order: u32) -> Vec<Complex<f64>> {
    (0..order)
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex::from_polar(1.0, theta)
        })
        .collect()
}

/// Pre-warp a normalized digital cutoff onto the analog axis
fn warp(wn: f64) -> f64 {
    (PI * wn / 2.0).tan()
}

fn design_digital(order: u32, band: Band) -> BandCoefficients {
    let prototype = prototype_poles(order);

    // Band transform in the analog domain. Zeros at the origin are kept
    // explicitly; zeros at infinity fall out of the pole/zero count.
    let (analog_poles, analog_zeros, gain) = match band {
        Band::Low(wn) => {
            let w = warp(wn);
            let poles: Vec<_> = prototype.iter().map(|p| p * w).collect();
            (poles, Vec::new(), w.powi(order as i32))
        }
        Band::High(wn) => {
            let w = warp(wn);
            let poles: Vec<_> = prototype.iter().map(|p| w / p).collect();
            let zeros = vec![Complex::new(0.0, 0.0); order as usize];
            (poles, zeros, 1.0)
        }
        Band::Pass(low, high) => {
            let (wl, wh) = (warp(low), warp(high));
            let w0 = (wl * wh).sqrt();
            let bw = wh - wl;
            let mut poles = Vec::with_capacity(2 * order as usize);
            for p in &prototype {
                let q = p * (bw / 2.0);
                let root = (q * q - w0 * w0).sqrt();
                poles.push(q + root);
                poles.push(q - root);
            }
            let zeros = vec![Complex::new(0.0, 0.0); order as usize];
            (poles, zeros, bw.powi(order as i32))
        }
    };

    // Bilinear transform s = (z - 1)/(z + 1); every excess pole
    // contributes a digital zero at z = -1.
    let one = Complex::new(1.0, 0.0);
    let digital_poles: Vec<_> = analog_poles.iter().map(|p| (one + p) / (one - p)).collect();
    let mut digital_zeros: Vec<_> = analog_zeros.iter().map(|z| (one + z) / (one - z)).collect();
    while digital_zeros.len() < digital_poles.len() {
        digital_zeros.push(Complex::new(-1.0, 0.0));
    }

    let num: Complex<f64> = analog_zeros.iter().fold(one, |acc, z| acc * (one - z));
    let den: Complex<f64> = analog_poles.iter().fold(one, |acc, p| acc * (one - p));
    let digital_gain = gain * (num / den).re;

    let a = real_polynomial(&digital_poles);
    let b: Vec<f64> = real_polynomial(&digital_zeros)
        .into_iter()
        .map(|c| c * digital_gain)
        .collect();

    BandCoefficients { b, a }
}

/// Expand a monic polynomial from its roots; conjugate-paired roots make
/// the imaginary parts cancel.
fn real_polynomial(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for root in roots {
        let mut next = vec![Complex::new(0.0, 0.0); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}
