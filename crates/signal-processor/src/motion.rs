//! Derived Ground-Motion Series

use serde::Serialize;

/// Acceleration history with its integrated velocity and displacement.
///
/// All four series share one length; the input acceleration and time
/// vectors are echoed untouched.
#[derive(Debug, Clone, Serialize)]
pub struct GroundMotion {
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub displacement: Vec<f64>,
    pub time: Vec<f64>,
}

impl GroundMotion {
    /// Peak ground velocity (max absolute velocity)
    pub fn pgv(&self) -> f64 {
        peak_abs(&self.velocity)
    }

    /// Peak ground displacement (max absolute displacement)
    pub fn pgd(&self) -> f64 {
        peak_abs(&self.displacement)
    }
}

fn peak_abs(series: &[f64]) -> f64 {
    series.iter().fold(0.0f64, |m, v| m.max(v.abs()))
}
