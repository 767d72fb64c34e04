//! Zero-Phase Filtering
//!
//! Forward-backward IIR application over an odd-extended signal, with
//! initial conditions chosen so the filter starts in steady state.

use crate::error::FilterError;

/// Remove the least-squares linear trend from a signal
pub fn detrend_linear(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n < 2 {
        return signal.to_vec();
    }
    let nf = n as f64;
    let sum_x = nf * (nf - 1.0) / 2.0;
    let sum_xx = nf * (nf - 1.0) * (2.0 * nf - 1.0) / 6.0;
    let sum_y: f64 = signal.iter().sum();
    let sum_xy: f64 = signal.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let denom = nf * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return signal.to_vec();
    }
    let slope = (nf * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / nf;
    signal
        .iter()
        .enumerate()
        .map(|(i, y)| y - (slope * i as f64 + intercept))
        .collect()
}

/// Apply the filter forward and backward for zero net phase shift.
///
/// The signal is extended on both ends with odd reflections about its
/// endpoints so the filter transients decay inside the padding, not in
/// the output.
pub(crate) fn filtfilt(b: &[f64], a: &[f64], x: &[f64]) -> Result<Vec<f64>, FilterError> {
    let n = x.len();
    let edge = 3 * b.len().max(a.len());
    if n <= edge {
        return Err(FilterError::SignalTooShort { len: n, min: edge + 1 });
    }

    let mut extended = Vec::with_capacity(n + 2 * edge);
    for i in (1..=edge).rev() {
        extended.push(2.0 * x[0] - x[i]);
    }
    extended.extend_from_slice(x);
    for i in 1..=edge {
        extended.push(2.0 * x[n - 1] - x[n - 1 - i]);
    }

    let zi = steady_state(b, a);

    let mut state: Vec<f64> = zi.iter().map(|z| z * extended[0]).collect();
    let mut forward = lfilter(b, a, &extended, &mut state);

    forward.reverse();
    let mut state: Vec<f64> = zi.iter().map(|z| z * forward[0]).collect();
    let mut backward = lfilter(b, a, &forward, &mut state);
    backward.reverse();

    Ok(backward[edge..edge + n].to_vec())
}

/// Direct-form II transposed IIR filter with explicit state
fn lfilter(b: &[f64], a: &[f64], x: &[f64], state: &mut [f64]) -> Vec<f64> {
    let order = b.len().max(a.len());
    let mut bp = vec![0.0; order];
    let mut ap = vec![0.0; order];
    bp[..b.len()].copy_from_slice(b);
    ap[..a.len()].copy_from_slice(a);

    let mut y = Vec::with_capacity(x.len());
    for &xi in x {
        let yi = bp[0] * xi + state[0];
        for i in 0..order - 2 {
            state[i] = bp[i + 1] * xi + state[i + 1] - ap[i + 1] * yi;
        }
        state[order - 2] = bp[order - 1] * xi - ap[order - 1] * yi;
        y.push(yi);
    }
    y
}

/// Initial filter state whose step response is immediately flat.
///
/// Solves `(I - C^T) zi = b[1..] - a[1..] b[0]` where `C` is the
/// companion matrix of `a`; scaling `zi` by the first input sample
/// removes the startup transient for signals near that level.
fn steady_state(b: &[f64], a: &[f64]) -> Vec<f64> {
    let order = b.len().max(a.len());
    let mut bp = vec![0.0; order];
    let mut ap = vec![0.0; order];
    bp[..b.len()].copy_from_slice(b);
    ap[..a.len()].copy_from_slice(a);

    let m = order - 1;
    let mut matrix = vec![vec![0.0; m]; m];
    let mut rhs = vec![0.0; m];
    for i in 0..m {
        matrix[i][0] = ap[i + 1];
        if i > 0 {
            matrix[i][i] = 1.0;
        }
        if i + 1 < m {
            matrix[i][i + 1] = -1.0;
        }
        rhs[i] = bp[i + 1] - ap[i + 1] * bp[0];
    }
    matrix[0][0] += 1.0;
    solve_linear(&mut matrix, &mut rhs);
    rhs
}

/// In-place Gaussian elimination with partial pivoting
fn solve_linear(matrix: &mut [Vec<f64>], rhs: &mut [f64]) {
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
        if diag.abs() < f64::EPSILON {
            continue;
        }
        for row in col + 1..m {
            let factor = matrix[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for k in col..m {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }
    for col in (0..m).rev() {
        let diag = matrix[col][col];
        if diag.abs() < f64::EPSILON {
            rhs[col] = 0.0;
            continue;
        }
        rhs[col] /= diag;
        for row in 0..col {
            rhs[row] -= matrix[row][col] * rhs[col];
        }
    }
}
