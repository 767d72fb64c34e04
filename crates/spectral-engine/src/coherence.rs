//! Magnitude-Squared Coherence

use rustfft::{num_complex::Complex, FftPlanner};
use seismic_record::RecordError;
use serde::Serialize;

use crate::error::SpectralError;
use crate::window::WindowKind;

/// Default samples per coherence segment
pub const DEFAULT_COHERENCE_SEGMENT: usize = 256;

/// Guard added to the coherence denominator before dividing
const DENOMINATOR_EPSILON: f64 = 1e-30;

/// Per-frequency coherence between two components, in [0, 1]
#[derive(Debug, Clone, Serialize)]
pub struct Coherence {
    /// Bin frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Magnitude-squared coherence per bin
    pub coherence: Vec<f64>,
}

/// Welch-averaged magnitude-squared coherence.
///
/// Auto- and cross-spectra are averaged over Hann-windowed segments with
/// 50% overlap; `|Pxy|² / (Pxx·Pyy)` with an epsilon guard, clamped into
/// [0, 1] to absorb floating-point spill.
pub(crate) fn coherence(
    planner: &mut FftPlanner<f64>,
    fs: f64,
    x: &[f64],
    y: &[f64],
    segment_length: usize,
) -> Result<Coherence, SpectralError> {
    if segment_length == 0 {
        return Err(SpectralError::ZeroSegmentLength);
    }
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
    let nperseg = segment_length.min(n);
    let step = (nperseg / 2).max(1);
    let segments = if n >= nperseg { (n - nperseg) / step + 1 } else { 1 };
    let bins = nperseg / 2 + 1;

    let taper = WindowKind::Hann.periodic(nperseg);
    let fft = planner.plan_fft_forward(nperseg);
    let mut buf_x = vec![Complex::new(0.0, 0.0); nperseg];
    let mut buf_y = vec![Complex::new(0.0, 0.0); nperseg];

    let mut pxx = vec![0.0f64; bins];
    let mut pyy = vec![0.0f64; bins];
    let mut pxy = vec![Complex::new(0.0, 0.0); bins];

    for s in 0..segments {
        let start = s * step;
        for i in 0..nperseg {
            buf_x[i] = Complex::new(x[start + i] * taper[i], 0.0);
            buf_y[i] = Complex::new(y[start + i] * taper[i], 0.0);
        }
        fft.process(&mut buf_x);
        fft.process(&mut buf_y);
        for k in 0..bins {
            pxx[k] += buf_x[k].norm_sqr();
            pyy[k] += buf_y[k].norm_sqr();
            pxy[k] += buf_x[k] * buf_y[k].conj();
        }
    }

    let scale = 1.0 / segments as f64;
    let mut frequencies_hz = Vec::with_capacity(bins);
    let mut values = Vec::with_capacity(bins);
    for k in 0..bins {
        let sxx = pxx[k] * scale;
        let syy = pyy[k] * scale;
        let sxy = pxy[k] * scale;
        let c = sxy.norm_sqr() / (sxx * syy + DENOMINATOR_EPSILON);
        frequencies_hz.push(k as f64 * fs / nperseg as f64);
        values.push(c.clamp(0.0, 1.0));
    }

    Ok(Coherence {
        frequencies_hz,
        coherence: values,
    })
}
