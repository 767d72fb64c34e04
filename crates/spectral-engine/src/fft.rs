//! Averaged FFT and Power Spectrum

use rustfft::{num_complex::Complex, FftPlanner};
use seismic_record::RecordError;
use serde::Serialize;
use tracing::debug;

use crate::error::SpectralError;
use crate::window::WindowKind;

/// Default samples per segment for the averaged FFT
pub const DEFAULT_SEGMENT_LENGTH: usize = 1024;

/// One-sided averaged spectrum with magnitude and phase
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    /// Bin frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Magnitude of the segment-averaged complex spectrum
    pub magnitude: Vec<f64>,
    /// Phase of the segment-averaged complex spectrum, radians
    pub phase_rad: Vec<f64>,
}

/// One-sided power spectrum `|X|^2 / N`
#[derive(Debug, Clone, Serialize)]
pub struct PowerSpectrum {
    /// Bin frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Power per bin
    pub power: Vec<f64>,
}

/// Block-averaged windowed FFT.
///
/// The signal splits into non-overlapping segments; the complex spectra
/// are averaged before taking magnitude and phase. Averaging complex
/// values cancels incoherent content across segments, unlike power
/// averaging, which accumulates it.
pub(crate) fn averaged_fft(
    planner: &mut FftPlanner<f64>,
    fs: f64,
    signal: &[f64],
    window: WindowKind,
    segment_length: usize,
) -> Result<Spectrum, SpectralError> {
    if segment_length == 0 {
        return Err(SpectralError::ZeroSegmentLength);
    }
    if signal.is_empty() {
        return Err(RecordError::EmptySeries.into());
    }
    let mut nperseg = segment_length;
    let mut num_segments = signal.len() / nperseg;
    if num_segments == 0 {
        nperseg = signal.len();
        num_segments = 1;
        debug!(
            "signal shorter than segment length, using one {}-sample segment",
            nperseg
        );
    }

    let taper = window.symmetric(nperseg);
    let bins = nperseg / 2 + 1;
    let fft = planner.plan_fft_forward(nperseg);
    let mut buffer = vec![Complex::new(0.0, 0.0); nperseg];
    let mut average = vec![Complex::new(0.0, 0.0); bins];

    for s in 0..num_segments {
        let start = s * nperseg;
        for (slot, (&sample, &w)) in buffer
            .iter_mut()
            .zip(signal[start..start + nperseg].iter().zip(taper.iter()))
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        fft.process(&mut buffer);
        for (avg, value) in average.iter_mut().zip(buffer.iter().take(bins)) {
            *avg += value;
        }
    }

    let scale = 1.0 / num_segments as f64;
    let mut frequencies_hz = Vec::with_capacity(bins);
    let mut magnitude = Vec::with_capacity(bins);
    let mut phase_rad = Vec::with_capacity(bins);
    for (k, avg) in average.iter().enumerate() {
        let mean = avg * scale;
        frequencies_hz.push(k as f64 * fs / nperseg as f64);
        magnitude.push(mean.norm());
        phase_rad.push(mean.arg());
    }

    Ok(Spectrum {
        frequencies_hz,
        magnitude,
        phase_rad,
    })
}

/// Power spectrum of the full signal, non-negative frequencies only
pub(crate) fn power_spectrum(
    planner: &mut FftPlanner<f64>,
    fs: f64,
    signal: &[f64],
) -> Result<PowerSpectrum, SpectralError> {
    if signal.is_empty() {
        return Err(RecordError::EmptySeries.into());
    }
    let n = signal.len();
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let bins = (n + 1) / 2;
    let mut frequencies_hz = Vec::with_capacity(bins);
    let mut power = Vec::with_capacity(bins);
    for (k, value) in buffer.iter().take(bins).enumerate() {
        frequencies_hz.push(k as f64 * fs / n as f64);
        power.push(value.norm_sqr() / n as f64);
    }

    Ok(PowerSpectrum {
        frequencies_hz,
        power,
    })
}
