//! Auto- and Cross-Correlation

use serde::Serialize;

use crate::error::SpectralError;

/// Correlation values over a range of sample lags
#[derive(Debug, Clone, Serialize)]
pub struct Correlation {
    /// Lags in samples; non-negative for autocorrelation, centered at
    /// zero for cross-correlation
    pub lags: Vec<i64>,
    /// Correlation value per lag
    pub values: Vec<f64>,
}

/// Z-score normalize a series; constant input has no defined correlation
fn zscore(signal: &[f64]) -> Result<Vec<f64>, SpectralError> {
    if signal.is_empty() {
        return Err(seismic_record::RecordError::EmptySeries.into());
    }
    let n = signal.len() as f64;
    let mean = signal.iter().sum::<f64>() / n;
    let variance = signal.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    if variance <= 0.0 {
        return Err(SpectralError::ZeroVariance);
    }
    let std = variance.sqrt();
    Ok(signal.iter().map(|v| (v - mean) / std).collect())
}

/// Autocorrelation at non-negative lags, normalized so lag 0 equals 1.
///
/// The signal is z-score normalized before correlating; `max_lag`
/// defaults to half the signal length.
pub fn autocorrelation(
    signal: &[f64],
    max_lag: Option<usize>,
) -> Result<Correlation, SpectralError> {
    let z = zscore(signal)?;
    let n = z.len();
    let limit = max_lag.unwrap_or(n / 2).min(n - 1);

    let r0: f64 = z.iter().map(|v| v * v).sum();
    let mut lags = Vec::with_capacity(limit + 1);
    let mut values = Vec::with_capacity(limit + 1);
    for lag in 0..=limit {
        let sum: f64 = z[..n - lag].iter().zip(z[lag..].iter()).map(|(a, b)| a * b).sum();
        lags.push(lag as i64);
        values.push(sum / r0);
    }

    Ok(Correlation { lags, values })
}

/// Cross-correlation over symmetric lags centered at zero.
///
/// Both series are z-score normalized; `c[lag] = (1/n)·Σ x[i+lag]·y[i]`,
/// so a `y` that lags `x` by `d` samples peaks at lag `-d`. Lengths must
/// match; `max_lag` defaults to half the common length.
pub fn cross_correlation(
    x: &[f64],
    y: &[f64],
    max_lag: Option<usize>,
) -> Result<Correlation, SpectralError> {
    if x.len() != y.len() {
        return Err(SpectralError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let zx = zscore(x)?;
    let zy = zscore(y)?;
    let n = zx.len();
    let limit = max_lag.unwrap_or(n / 2).min(n - 1) as i64;

    let mut lags = Vec::with_capacity(2 * limit as usize + 1);
    let mut values = Vec::with_capacity(2 * limit as usize + 1);
    for lag in -limit..=limit {
        let mut sum = 0.0;
        for i in 0..n as i64 {
            let j = i + lag;
            if j >= 0 && j < n as i64 {
                sum += zx[j as usize] * zy[i as usize];
            }
        }
        lags.push(lag);
        values.push(sum / n as f64);
    }

    Ok(Correlation { lags, values })
}
