//! Threshold Peak Picking

use serde::{Deserialize, Serialize};

use crate::error::DetectError;

/// Peak detection parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Minimum height; defaults to three standard deviations of the signal
    pub threshold: Option<f64>,
    /// Minimum spacing between kept peaks; defaults to 0.5 s
    pub min_distance_s: Option<f64>,
}

/// Default minimum spacing between peaks, seconds
pub const DEFAULT_MIN_DISTANCE_S: f64 = 0.5;

/// Detected peaks in ascending index order
#[derive(Debug, Clone, Serialize)]
pub struct Peaks {
    /// Sample indices of the kept peaks
    pub indices: Vec<usize>,
    /// Absolute amplitude at each kept peak
    pub heights: Vec<f64>,
    /// Threshold that was applied
    pub threshold: f64,
}

impl Peaks {
    /// Whether no peak cleared the threshold
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Local maxima of `|signal|` above a threshold, spaced apart.
///
/// Flat-topped maxima resolve to the plateau midpoint. When peaks fall
/// closer than the minimum distance, the taller one survives. Finding
/// nothing is a normal outcome, not an error.
pub(crate) fn detect_peaks(
    fs: f64,
    signal: &[f64],
    config: &PeakConfig,
) -> Result<Peaks, DetectError> {
    if signal.is_empty() {
        return Err(DetectError::EmptySignal);
    }
    let threshold = match config.threshold {
        Some(value) => value,
        None => 3.0 * std_dev(signal),
    };
    let min_distance =
        ((config.min_distance_s.unwrap_or(DEFAULT_MIN_DISTANCE_S) * fs) as usize).max(1);

    let magnitude: Vec<f64> = signal.iter().map(|v| v.abs()).collect();
    let candidates = local_maxima(&magnitude);

    let mut kept: Vec<usize> = candidates
        .into_iter()
        .filter(|&i| magnitude[i] >= threshold)
        .collect();

    // Distance suppression by descending height, as find_peaks does.
    kept.sort_by(|&a, &b| magnitude[b].partial_cmp(&magnitude[a]).unwrap());
    let mut suppressed = vec![false; signal.len()];
    let mut selected = Vec::new();
    for &peak in &kept {
        if suppressed[peak] {
            continue;
        }
        selected.push(peak);
        let lo = peak.saturating_sub(min_distance);
        let hi = (peak + min_distance).min(signal.len() - 1);
        for flag in suppressed[lo..=hi].iter_mut() {
            *flag = true;
        }
    }
    selected.sort_unstable();

    let heights = selected.iter().map(|&i| magnitude[i]).collect();
    Ok(Peaks {
        indices: selected,
        heights,
        threshold,
    })
}

/// Indices of strict local maxima, plateaus reduced to their midpoint
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    let mut maxima = Vec::new();
    let mut i = 1;
    while i + 1 < n {
        if values[i] > values[i - 1] {
            // Walk the plateau, if any.
            let mut j = i;
            while j + 1 < n && values[j + 1] == values[i] {
                j += 1;
            }
            if j + 1 < n && values[j + 1] < values[i] {
                maxima.push((i + j) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    maxima
}

fn std_dev(signal: &[f64]) -> f64 {
    let n = signal.len() as f64;
    let mean = signal.iter().sum::<f64>() / n;
    (signal.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt()
}
