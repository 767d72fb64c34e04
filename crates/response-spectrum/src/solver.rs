//! Newmark-β SDOF Integration

use crate::config::{SaFormulation, SolverConfig};

/// Newmark velocity weighting (average acceleration scheme)
const GAMMA: f64 = 0.5;
/// Newmark displacement weighting (average acceleration scheme)
const BETA: f64 = 0.25;

/// Spectral ordinates of one oscillator
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodPeaks {
    pub sd: f64,
    pub sv: f64,
    pub sa: f64,
}

/// Integrate a unit-mass SDOF oscillator through the ground acceleration.
///
/// Average-acceleration Newmark-β (γ = 0.5, β = 0.25), incremental form:
/// the out-of-balance force at each step drives a displacement increment
/// solved against the effective stiffness `k + a1`. State is three
/// scalars, so the period loop allocates nothing.
pub(crate) fn sdof_peaks(
    acceleration: &[f64],
    dt: f64,
    period: f64,
    config: &SolverConfig,
) -> PeriodPeaks {
    let omega = 2.0 * std::f64::consts::PI / period;
    let c = 2.0 * config.damping_ratio * omega;
    let k = omega * omega;

    let a1 = 1.0 / (BETA * dt * dt) + (GAMMA * c) / (BETA * dt);
    let a2 = 1.0 / (BETA * dt);

    let mut u = 0.0f64;
    let mut v = 0.0f64;
    let mut max_u = 0.0f64;
    let mut max_v = 0.0f64;
    let mut max_total = 0.0f64;

    for &ag in &acceleration[1..] {
        let dp = -k * u - c * v - ag;
        let du = dp / (k + a1);
        u += du;
        v += a2 * du;

        max_u = max_u.max(u.abs());
        max_v = max_v.max(v.abs());
        if config.sa_formulation == SaFormulation::AbsoluteAcceleration {
            // By equilibrium, ü + a_g = -(c·v + k·u).
            max_total = max_total.max((c * v + k * u).abs());
        }
    }

    let sa = match config.sa_formulation {
        SaFormulation::PseudoAcceleration => omega * omega * max_u,
        SaFormulation::AbsoluteAcceleration => max_total,
    };

    PeriodPeaks {
        sd: max_u,
        sv: max_v,
        sa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const FS: f64 = 100.0;

    fn config(damping: f64, formulation: SaFormulation) -> SolverConfig {
        SolverConfig {
            damping_ratio: damping,
            sa_formulation: formulation,
        }
    }

    fn sine(freq_hz: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / FS).sin())
            .collect()
    }

    #[test]
    fn test_resonant_oscillator_amplifies() {
        // Forcing at the natural period drives a lightly damped
        // oscillator well beyond the static response 1/ω².
        let period = 0.5;
        let acc = sine(1.0 / period, 4000);
        let cfg = config(0.02, SaFormulation::PseudoAcceleration);
        let resonant = sdof_peaks(&acc, 1.0 / FS, period, &cfg);
        let detuned = sdof_peaks(&acc, 1.0 / FS, period * 4.0, &cfg);
        assert!(resonant.sd > 5.0 * detuned.sd);
    }

    #[test]
    fn test_higher_damping_lowers_response() {
        let period = 0.4;
        let acc = sine(1.0 / period, 4000);
        let light = sdof_peaks(
            &acc,
            1.0 / FS,
            period,
            &config(0.02, SaFormulation::PseudoAcceleration),
        );
        let heavy = sdof_peaks(
            &acc,
            1.0 / FS,
            period,
            &config(0.20, SaFormulation::PseudoAcceleration),
        );
        assert!(heavy.sd < light.sd);
    }

    #[test]
    fn test_pseudo_sa_matches_omega_squared_sd() {
        let acc = sine(3.0, 2000);
        let period = 0.3;
        let peaks = sdof_peaks(
            &acc,
            1.0 / FS,
            period,
            &config(0.05, SaFormulation::PseudoAcceleration),
        );
        let omega = 2.0 * PI / period;
        assert!((peaks.sa - omega * omega * peaks.sd).abs() < 1e-12);
    }

    #[test]
    fn test_formulations_agree_at_light_damping() {
        // For small damping the pseudo and absolute ordinates converge.
        let acc = sine(2.0, 4000);
        let period = 0.5;
        let pseudo = sdof_peaks(
            &acc,
            1.0 / FS,
            period,
            &config(0.01, SaFormulation::PseudoAcceleration),
        );
        let absolute = sdof_peaks(
            &acc,
            1.0 / FS,
            period,
            &config(0.01, SaFormulation::AbsoluteAcceleration),
        );
        let relative = (pseudo.sa - absolute.sa).abs() / absolute.sa;
        assert!(relative < 0.1, "formulations differ by {}", relative);
    }

    #[test]
    fn test_zero_input_stays_at_rest() {
        let acc = vec![0.0; 1000];
        let peaks = sdof_peaks(
            &acc,
            1.0 / FS,
            1.0,
            &config(0.05, SaFormulation::PseudoAcceleration),
        );
        assert_eq!(peaks.sd, 0.0);
        assert_eq!(peaks.sv, 0.0);
        assert_eq!(peaks.sa, 0.0);
    }
}
