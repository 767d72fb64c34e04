//! Spectral Analysis Engine
//!
//! Frequency-domain characterization of strong-motion components:
//! block-averaged FFT, power spectrum, spectrogram, auto- and
//! cross-correlation, magnitude-squared coherence, and per-frequency
//! amplitude/phase comparison between components.

mod coherence;
mod correlation;
mod error;
mod fft;
mod ratio;
mod spectrogram;
mod window;

pub use coherence::{Coherence, DEFAULT_COHERENCE_SEGMENT};
pub use correlation::{autocorrelation, cross_correlation, Correlation};
pub use error::SpectralError;
pub use fft::{PowerSpectrum, Spectrum, DEFAULT_SEGMENT_LENGTH};
pub use ratio::SpectralRatio;
pub use spectrogram::{Spectrogram, DEFAULT_SPECTROGRAM_SEGMENT};
pub use window::WindowKind;

use rustfft::FftPlanner;

/// Spectral analysis engine bound to a sampling rate.
///
/// Holds an FFT planner so repeated calls at the same lengths reuse
/// their plans.
pub struct SpectralAnalyzer {
    fs: f64,
    planner: FftPlanner<f64>,
}

impl SpectralAnalyzer {
    /// Create an engine for signals sampled at `sampling_rate` Hz
    pub fn new(sampling_rate: f64) -> Result<Self, SpectralError> {
        if !(sampling_rate > 0.0) || !sampling_rate.is_finite() {
            return Err(SpectralError::InvalidSamplingRate {
                rate: sampling_rate,
            });
        }
        Ok(Self {
            fs: sampling_rate,
            planner: FftPlanner::new(),
        })
    }

    /// Sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.fs
    }

    /// Block-averaged windowed spectrum (magnitude and phase).
    ///
    /// Complex spectra of non-overlapping segments are averaged before
    /// taking magnitude, which cancels incoherent content; this is not
    /// a Welch power estimate.
    pub fn averaged_fft(
        &mut self,
        signal: &[f64],
        window: WindowKind,
        segment_length: usize,
    ) -> Result<Spectrum, SpectralError> {
        fft::averaged_fft(&mut self.planner, self.fs, signal, window, segment_length)
    }

    /// One-sided power spectrum `|X|²/N` of the whole signal
    pub fn power_spectrum(&mut self, signal: &[f64]) -> Result<PowerSpectrum, SpectralError> {
        fft::power_spectrum(&mut self.planner, self.fs, signal)
    }

    /// Detrended, density-scaled spectrogram over overlapping segments.
    ///
    /// `overlap` defaults to half the segment length.
    pub fn spectrogram(
        &mut self,
        signal: &[f64],
        window: WindowKind,
        segment_length: usize,
        overlap: Option<usize>,
    ) -> Result<Spectrogram, SpectralError> {
        spectrogram::spectrogram(&mut self.planner, self.fs, signal, window, segment_length, overlap)
    }

    /// Welch-averaged magnitude-squared coherence between two components
    pub fn coherence(
        &mut self,
        x: &[f64],
        y: &[f64],
        segment_length: usize,
    ) -> Result<Coherence, SpectralError> {
        coherence::coherence(&mut self.planner, self.fs, x, y, segment_length)
    }

    /// Per-frequency amplitude ratio and phase difference of `x` over `y`
    pub fn spectral_ratio(&mut self, x: &[f64], y: &[f64]) -> Result<SpectralRatio, SpectralError> {
        ratio::spectral_ratio(&mut self.planner, self.fs, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rejects_bad_sampling_rate() {
        assert!(SpectralAnalyzer::new(0.0).is_err());
        assert!(SpectralAnalyzer::new(-10.0).is_err());
        assert!(SpectralAnalyzer::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_planner_reuse_across_calls() {
        let mut analyzer = SpectralAnalyzer::new(100.0).unwrap();
        let signal: Vec<f64> = (0..2048)
            .map(|i| (2.0 * PI * 5.0 * i as f64 / 100.0).sin())
            .collect();
        let first = analyzer
            .averaged_fft(&signal, WindowKind::Hann, 1024)
            .unwrap();
        let second = analyzer
            .averaged_fft(&signal, WindowKind::Hann, 1024)
            .unwrap();
        assert_eq!(first.magnitude.len(), second.magnitude.len());
        for (a, b) in first.magnitude.iter().zip(second.magnitude.iter()) {
            assert_eq!(a, b);
        }
    }
}
