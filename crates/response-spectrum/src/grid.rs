//! Natural Period Grids

/// Shortest period of the default grid, seconds
pub const DEFAULT_MIN_PERIOD_S: f64 = 0.01;
/// Longest period of the default grid, seconds
pub const DEFAULT_MAX_PERIOD_S: f64 = 10.0;
/// Number of periods in the default grid
pub const DEFAULT_PERIOD_COUNT: usize = 100;

/// Logarithmically spaced grid from `start` to `stop`, inclusive.
///
/// Both endpoints must be positive; a single-point grid returns `start`.
pub fn log_spaced(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let log_start = start.log10();
    let log_stop = stop.log10();
    let step = (log_stop - log_start) / (count - 1) as f64;
    (0..count)
        .map(|i| 10f64.powf(log_start + step * i as f64))
        .collect()
}

/// Standard 100-point grid from 0.01 s to 10 s
pub fn default_periods() -> Vec<f64> {
    log_spaced(DEFAULT_MIN_PERIOD_S, DEFAULT_MAX_PERIOD_S, DEFAULT_PERIOD_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_endpoints() {
        let grid = default_periods();
        assert_eq!(grid.len(), 100);
        assert!((grid[0] - 0.01).abs() < 1e-12);
        assert!((grid[99] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_spacing_has_constant_ratio() {
        let grid = log_spaced(0.1, 10.0, 21);
        let ratio = grid[1] / grid[0];
        for pair in grid.windows(2) {
            assert!((pair[1] / pair[0] - ratio).abs() < 1e-9);
        }
    }

    #[test]
    fn test_strictly_increasing() {
        let grid = default_periods();
        assert!(grid.windows(2).all(|p| p[1] > p[0]));
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(log_spaced(0.01, 10.0, 0).is_empty());
        assert_eq!(log_spaced(0.5, 10.0, 1), vec![0.5]);
    }
}
