//! Trapezoidal Integration

/// Cumulative trapezoidal integral with the first sample anchored at zero
pub(crate) fn trapezoid(signal: &[f64], dt: f64) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(signal.len());
    out.push(0.0);
    for i in 1..signal.len() {
        let step = (signal[i] + signal[i - 1]) * dt / 2.0;
        let prev = out[i - 1];
        out.push(prev + step);
    }
    out
}
