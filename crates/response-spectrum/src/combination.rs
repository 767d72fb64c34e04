//! Multi-Component Combination Rules

use crate::config::CombinationMethod;
use crate::ResponseSpectrum;

/// Cyclic weightings of the 30% percentage rule
const PERCENTAGE_WEIGHTS: [(f64, f64, f64); 3] =
    [(1.0, 0.3, 0.3), (0.3, 1.0, 0.3), (0.3, 0.3, 1.0)];

/// Combine one spectral quantity across the three axes
pub(crate) fn combine(
    method: CombinationMethod,
    east: &[f64],
    north: &[f64],
    vertical: &[f64],
) -> Vec<f64> {
    match method {
        CombinationMethod::Srss => east
            .iter()
            .zip(north.iter())
            .zip(vertical.iter())
            .map(|((&e, &n), &z)| (e * e + n * n + z * z).sqrt())
            .collect(),
        CombinationMethod::Percentage30 => (0..east.len())
            .map(|i| {
                PERCENTAGE_WEIGHTS
                    .iter()
                    .map(|&(we, wn, wz)| {
                        (we * east[i]).abs() + (wn * north[i]).abs() + (wz * vertical[i]).abs()
                    })
                    .fold(0.0f64, f64::max)
            })
            .collect(),
    }
}

/// Combine Sa, Sv, and Sd of three per-axis spectra
pub(crate) fn combine_spectra(
    method: CombinationMethod,
    east: &ResponseSpectrum,
    north: &ResponseSpectrum,
    vertical: &ResponseSpectrum,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        combine(method, &east.sa, &north.sa, &vertical.sa),
        combine(method, &east.sv, &north.sv, &vertical.sv),
        combine(method, &east.sd, &north.sd, &vertical.sd),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srss_of_equal_axes() {
        let axis = vec![1.0, 2.0, 3.0];
        let combined = combine(CombinationMethod::Srss, &axis, &axis, &axis);
        for (c, a) in combined.iter().zip(axis.iter()) {
            assert!((c - a * 3f64.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_percentage_dominant_axis() {
        // One dominant axis: the weighting centered on it wins.
        let east = vec![10.0];
        let north = vec![1.0];
        let vertical = vec![1.0];
        let combined = combine(CombinationMethod::Percentage30, &east, &north, &vertical);
        assert!((combined[0] - (10.0 + 0.3 + 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_percentage_uses_absolute_values() {
        let combined = combine(
            CombinationMethod::Percentage30,
            &[-10.0],
            &[1.0],
            &[-1.0],
        );
        assert!((combined[0] - 10.6).abs() < 1e-12);
    }

    #[test]
    fn test_combined_never_below_largest_axis() {
        let east = vec![4.0, 0.5];
        let north = vec![1.0, 3.0];
        let vertical = vec![2.0, 1.0];
        for method in [CombinationMethod::Srss, CombinationMethod::Percentage30] {
            let combined = combine(method, &east, &north, &vertical);
            for i in 0..east.len() {
                let largest = east[i].max(north[i]).max(vertical[i]);
                assert!(combined[i] >= largest);
            }
        }
    }
}
