//! Series Validation, Statistics, and Resampling

use serde::Serialize;
use tracing::debug;

use crate::error::RecordError;

/// Check that a series is long enough and contains only usable values.
///
/// NaN and infinity are rejected unless explicitly allowed.
pub fn validate_series(
    series: &[f64],
    min_len: usize,
    allow_nan: bool,
    allow_inf: bool,
) -> Result<(), RecordError> {
    if series.is_empty() {
        return Err(RecordError::EmptySeries);
    }
    if series.len() < min_len {
        return Err(RecordError::SeriesTooShort {
            len: series.len(),
            min: min_len,
        });
    }
    for (index, value) in series.iter().enumerate() {
        if value.is_nan() {
            if !allow_nan {
                return Err(RecordError::NanValue { index });
            }
        } else if value.is_infinite() && !allow_inf {
            return Err(RecordError::InfiniteValue { index });
        }
    }
    Ok(())
}

/// Basic amplitude statistics of a series
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalStats {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Standard deviation (population)
    pub std_dev: f64,
    /// Root mean square
    pub rms: f64,
    /// Max minus min
    pub peak_to_peak: f64,
    /// Largest absolute value
    pub abs_max: f64,
}

impl SignalStats {
    /// Compute statistics over a finite, non-empty series
    pub fn compute(series: &[f64]) -> Result<Self, RecordError> {
        validate_series(series, 1, false, false)?;

        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let min = series.iter().cloned().fold(f64::MAX, f64::min);
        let max = series.iter().cloned().fold(f64::MIN, f64::max);

        let mut sq_sum = 0.0;
        let mut var_sum = 0.0;
        for &v in series {
            sq_sum += v * v;
            let d = v - mean;
            var_sum += d * d;
        }

        Ok(Self {
            min,
            max,
            mean,
            std_dev: (var_sum / n).sqrt(),
            rms: (sq_sum / n).sqrt(),
            peak_to_peak: max - min,
            abs_max: min.abs().max(max.abs()),
        })
    }
}

/// Resample a series onto a new sampling rate by linear interpolation.
///
/// Rates that match within floating-point tolerance return the input
/// unchanged. The resampled series covers the same duration.
pub fn resample(
    series: &[f64],
    original_fs: f64,
    target_fs: f64,
) -> Result<Vec<f64>, RecordError> {
    validate_series(series, 1, false, false)?;
    if !(original_fs > 0.0) || !original_fs.is_finite() {
        return Err(RecordError::InvalidSamplingRate { rate: original_fs });
    }
    if !(target_fs > 0.0) || !target_fs.is_finite() {
        return Err(RecordError::InvalidSamplingRate { rate: target_fs });
    }

    if (original_fs - target_fs).abs() <= 1e-8 + 1e-5 * target_fs.abs() {
        return Ok(series.to_vec());
    }

    let duration = series.len() as f64 / original_fs;
    let n_samples = (duration * target_fs) as usize;

    if series.len() == 1 {
        return Ok(vec![series[0]; n_samples]);
    }

    // Both grids span [0, duration] inclusive.
    let src_dt = duration / (series.len() - 1) as f64;
    let dst_dt = if n_samples > 1 {
        duration / (n_samples - 1) as f64
    } else {
        0.0
    };

    let mut out = Vec::with_capacity(n_samples);
    let mut seg = 0usize;
    for i in 0..n_samples {
        let t = i as f64 * dst_dt;
        while seg + 2 < series.len() && (seg + 1) as f64 * src_dt < t {
            seg += 1;
        }
        let t0 = seg as f64 * src_dt;
        let frac = ((t - t0) / src_dt).clamp(0.0, 1.0);
        out.push(series[seg] + (series[seg + 1] - series[seg]) * frac);
    }

    debug!(
        "resampled {} samples at {} Hz to {} samples at {} Hz",
        series.len(),
        original_fs,
        out.len(),
        target_fs
    );
    Ok(out)
}
