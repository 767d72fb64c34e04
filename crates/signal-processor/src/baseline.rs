//! Polynomial Baseline Correction
//!
//! Least-squares polynomial fit over a time axis normalized to [0, 1]
//! for numerical conditioning, subtracted from the signal.

use crate::error::ProcessError;

/// Fit and subtract a polynomial trend of the given order
pub(crate) fn detrend_polynomial(signal: &[f64], order: usize) -> Result<Vec<f64>, ProcessError> {
    if signal.is_empty() {
        return Err(ProcessError::EmptySignal);
    }
    let n = signal.len();
    // A fit needs more points than coefficients.
    let order = order.min(n - 1);
    let t: Vec<f64> = if n == 1 {
        vec![0.0]
    } else {
        (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
    };
    let coefficients = polyfit(&t, signal, order);
    Ok(signal
        .iter()
        .zip(t.iter())
        .map(|(&y, &ti)| y - polyval(&coefficients, ti))
        .collect())
}

/// Least-squares polynomial fit via the normal equations.
///
/// Returns ascending-power coefficients `c[0] + c[1] t + ...`.
fn polyfit(t: &[f64], y: &[f64], order: usize) -> Vec<f64> {
    let m = order + 1;
    let mut moments = vec![0.0; 2 * order + 1];
    let mut rhs = vec![0.0; m];
    for (&ti, &yi) in t.iter().zip(y.iter()) {
        let mut power = 1.0;
        for (p, moment) in moments.iter_mut().enumerate() {
            *moment += power;
            if p < m {
                rhs[p] += power * yi;
            }
            power *= ti;
        }
    }
    let mut matrix: Vec<Vec<f64>> = (0..m)
        .map(|j| (0..m).map(|k| moments[j + k]).collect())
        .collect();
    gauss_jordan(&mut matrix, &mut rhs);
    rhs
}

/// Evaluate ascending-power coefficients at `t`
fn polyval(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// In-place Gauss-Jordan elimination with partial pivoting.
///
/// A degenerate pivot zeroes the corresponding coefficient instead of
/// poisoning the solution.
fn gauss_jordan(matrix: &mut [Vec<f64>], rhs: &mut [f64]) {
    let m = rhs.len();
    for col in 0..m {
        let pivot = (col..m)
            .max_by(|&i, &j| {
                matrix[i][col]
                    .abs()
                    .partial_cmp(&matrix[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);
        let diag = matrix[col][col];
        if diag.abs() < 1e-12 {
            rhs[col] = 0.0;
            continue;
        }
        for k in col..m {
            matrix[col][k] /= diag;
        }
        rhs[col] /= diag;
        for row in 0..m {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..m {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_cubic_drift_exactly() {
        let n = 500;
        let drift: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                2.0 - 1.5 * t + 0.8 * t * t - 3.0 * t * t * t
            })
            .collect();
        let corrected = detrend_polynomial(&drift, 3).unwrap();
        for v in corrected {
            assert!(v.abs() < 1e-8, "residual {}", v);
        }
    }

    #[test]
    fn test_preserves_oscillation_over_drift() {
        let n = 1000;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                (40.0 * std::f64::consts::PI * t).sin() + 5.0 * t * t
            })
            .collect();
        let corrected = detrend_polynomial(&signal, 3).unwrap();
        let peak = corrected.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(peak > 0.9 && peak < 1.2, "peak {}", peak);
    }

    #[test]
    fn test_constant_signal_zeroed() {
        let corrected = detrend_polynomial(&[4.2; 50], 3).unwrap();
        for v in corrected {
            assert!(v.abs() < 1e-10);
        }
    }

    #[test]
    fn test_order_clamped_for_tiny_signals() {
        // Two samples support at most a linear fit; both land on the line.
        let corrected = detrend_polynomial(&[1.0, 3.0], 3).unwrap();
        assert!(corrected[0].abs() < 1e-10);
        assert!(corrected[1].abs() < 1e-10);
    }

    #[test]
    fn test_single_sample_zeroed() {
        assert_eq!(detrend_polynomial(&[7.0], 3).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_empty_signal_rejected() {
        assert!(matches!(
            detrend_polynomial(&[], 3),
            Err(ProcessError::EmptySignal)
        ));
    }

    use proptest::prelude::*;

    proptest! {
        /// Any cubic trend is removed down to numerical noise.
        #[test]
        fn prop_cubic_trend_removed(
            c0 in -5.0f64..5.0,
            c1 in -5.0f64..5.0,
            c2 in -5.0f64..5.0,
            c3 in -5.0f64..5.0,
        ) {
            let n = 400;
            let signal: Vec<f64> = (0..n)
                .map(|i| {
                    let t = i as f64 / (n - 1) as f64;
                    c0 + c1 * t + c2 * t * t + c3 * t * t * t
                })
                .collect();
            let corrected = detrend_polynomial(&signal, 3).unwrap();
            for v in corrected {
                prop_assert!(v.abs() < 1e-6, "residual {}", v);
            }
        }
    }
}
