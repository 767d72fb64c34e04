//! Solver Configuration

use serde::{Deserialize, Serialize};

/// How the pseudo-acceleration ordinate is derived.
///
/// Both conventions appear in engineering practice; the choice is
/// explicit so conformance against either reference is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaFormulation {
    /// `Sa = ω²·Sd`: relative pseudo-acceleration, the classic
    /// design-spectrum convention. Exact for zero damping.
    PseudoAcceleration,
    /// `Sa = max|c·v + k·u|`: peak total acceleration of the oscillator
    /// mass (`ü + a_g` by equilibrium).
    AbsoluteAcceleration,
}

impl Default for SaFormulation {
    fn default() -> Self {
        Self::PseudoAcceleration
    }
}

/// Multi-component combination rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMethod {
    /// Square root of the sum of squares across the three axes
    Srss,
    /// 30% rule: cyclic weightings (1, .3, .3), elementwise maximum of
    /// the weighted absolute sums
    Percentage30,
}

/// Parameters of the SDOF spectrum solver
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Fraction of critical damping, typically 0.05
    pub damping_ratio: f64,
    /// Pseudo-acceleration convention
    pub sa_formulation: SaFormulation,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            damping_ratio: 0.05,
            sa_formulation: SaFormulation::default(),
        }
    }
}
