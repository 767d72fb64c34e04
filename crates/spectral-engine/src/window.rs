//! Window Functions
//!
//! Symmetric windows for one-shot spectra, periodic windows for
//! overlapped segment analysis.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Taper applied to a segment before its FFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowKind {
    /// Symmetric window of length `n`, endpoints on the taper
    pub fn symmetric(&self, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![1.0; n];
        }
        self.evaluate(n, (n - 1) as f64)
    }

    /// Periodic window of length `n`, suited to overlapped segments
    pub fn periodic(&self, n: usize) -> Vec<f64> {
        if n <= 1 {
            return vec![1.0; n];
        }
        self.evaluate(n, n as f64)
    }

    fn evaluate(&self, n: usize, denom: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / denom;
                match self {
                    Self::Hann => 0.5 - 0.5 * x.cos(),
                    Self::Hamming => 0.54 - 0.46 * x.cos(),
                    Self::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                    Self::Rectangular => 1.0,
                }
            })
            .collect()
    }
}

impl Default for WindowKind {
    fn default() -> Self {
        Self::Hann
    }
}
