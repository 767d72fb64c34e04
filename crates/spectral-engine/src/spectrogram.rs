//! Short-Time Fourier Spectrogram

use ndarray::Array2;
use rustfft::{num_complex::Complex, FftPlanner};
use seismic_record::RecordError;
use serde::Serialize;
use tracing::debug;

use crate::error::SpectralError;
use crate::window::WindowKind;

/// Default samples per spectrogram segment
pub const DEFAULT_SPECTROGRAM_SEGMENT: usize = 256;

/// Time-frequency power map, one row per frequency bin
#[derive(Debug, Clone, Serialize)]
pub struct Spectrogram {
    /// Row frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Column times in seconds, at segment centers
    pub times_s: Vec<f64>,
    /// Power spectral density, shape (frequency bins, time frames)
    pub power: Array2<f64>,
}

/// Density-scaled spectrogram over overlapping windowed segments.
///
/// The linear trend is removed from the whole signal first. Long outputs
/// are smoothed along time with a short uniform kernel to stabilize the
/// display of noisy records.
pub(crate) fn spectrogram(
    planner: &mut FftPlanner<f64>,
    fs: f64,
    signal: &[f64],
    window: WindowKind,
    segment_length: usize,
    overlap: Option<usize>,
) -> Result<Spectrogram, SpectralError> {
    if segment_length == 0 {
        return Err(SpectralError::ZeroSegmentLength);
    }
    if signal.is_empty() {
        return Err(RecordError::EmptySeries.into());
    }
    let n = signal.len();
    let nperseg = segment_length.min(n);
    let noverlap = match overlap {
        Some(value) => value.min(nperseg - 1),
        None => nperseg / 2,
    };
    let step = nperseg - noverlap;
    let frames = (n - noverlap) / step;
    let bins = nperseg / 2 + 1;

    let detrended = filter_engine::detrend_linear(signal);
    let taper = window.periodic(nperseg);
    let window_power: f64 = taper.iter().map(|w| w * w).sum();
    let scale = 1.0 / (fs * window_power);

    let fft = planner.plan_fft_forward(nperseg);
    let mut buffer = vec![Complex::new(0.0, 0.0); nperseg];
    let mut power = Array2::<f64>::zeros((bins, frames));
    let nyquist_bin = if nperseg % 2 == 0 { Some(bins - 1) } else { None };

    for frame in 0..frames {
        let start = frame * step;
        for (slot, (&sample, &w)) in buffer
            .iter_mut()
            .zip(detrended[start..start + nperseg].iter().zip(taper.iter()))
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        fft.process(&mut buffer);
        for k in 0..bins {
            let mut p = buffer[k].norm_sqr() * scale;
            // One-sided density folds the negative frequencies in.
            if k != 0 && Some(k) != nyquist_bin {
                p *= 2.0;
            }
            power[[k, frame]] = p;
        }
    }

    if frames > 100 {
        let kernel = 5.min(frames / 10);
        debug!("smoothing {} spectrogram frames with {}-point kernel", frames, kernel);
        smooth_rows(&mut power, kernel);
    }

    let frequencies_hz = (0..bins).map(|k| k as f64 * fs / nperseg as f64).collect();
    let times_s = (0..frames)
        .map(|k| (nperseg as f64 / 2.0 + (k * step) as f64) / fs)
        .collect();

    Ok(Spectrogram {
        frequencies_hz,
        times_s,
        power,
    })
}

/// Centered zero-padded moving average along each row
fn smooth_rows(power: &mut Array2<f64>, kernel: usize) {
    let half = kernel / 2;
    for mut row in power.rows_mut() {
        let original = row.to_vec();
        let len = original.len();
        for (i, slot) in row.iter_mut().enumerate() {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(len - 1);
            let sum: f64 = original[lo..=hi].iter().sum();
            *slot = sum / kernel as f64;
        }
    }
}
