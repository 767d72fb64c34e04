//! Record Components

use serde::{Deserialize, Serialize};

use crate::filter_spec::FilterSpec;

/// Channel identity of a triaxial accelerograph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// East-West horizontal channel
    East,
    /// North-South horizontal channel
    North,
    /// Vertical channel
    Vertical,
}

impl ComponentId {
    /// All channels in raw-buffer block order
    pub const ALL: [ComponentId; 3] = [Self::East, Self::North, Self::Vertical];

    /// Single-letter channel code
    pub fn code(&self) -> &'static str {
        match self {
            Self::East => "E",
            Self::North => "N",
            Self::Vertical => "Z",
        }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One channel of a record: acceleration plus derived motion series.
///
/// Peak values are cached and refreshed whenever the underlying series
/// change. Velocity and displacement are written only by the integration
/// engine through [`Component::set_derived_motion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
    acceleration: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    velocity: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    displacement: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pga: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pgd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orientation_deg: Option<f64>,
    is_filtered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_spec: Option<FilterSpec>,
}

impl Component {
    /// Create a component from an acceleration series
    pub fn new(id: ComponentId, acceleration: Vec<f64>) -> Self {
        let pga = peak_abs(&acceleration);
        Self {
            id,
            acceleration,
            velocity: None,
            displacement: None,
            pga,
            pgv: None,
            pgd: None,
            orientation_deg: None,
            is_filtered: false,
            filter_spec: None,
        }
    }

    /// Channel identity
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Acceleration series
    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }

    /// Derived velocity series, if computed
    pub fn velocity(&self) -> Option<&[f64]> {
        self.velocity.as_deref()
    }

    /// Derived displacement series, if computed
    pub fn displacement(&self) -> Option<&[f64]> {
        self.displacement.as_deref()
    }

    /// Peak ground acceleration (max absolute acceleration)
    pub fn pga(&self) -> Option<f64> {
        self.pga
    }

    /// Peak ground velocity
    pub fn pgv(&self) -> Option<f64> {
        self.pgv
    }

    /// Peak ground displacement
    pub fn pgd(&self) -> Option<f64> {
        self.pgd
    }

    /// Sensor orientation in degrees from north, if known
    pub fn orientation_deg(&self) -> Option<f64> {
        self.orientation_deg
    }

    /// Set the sensor orientation
    pub fn set_orientation_deg(&mut self, degrees: f64) {
        self.orientation_deg = Some(degrees);
    }

    /// Whether the acceleration series has been filtered
    pub fn is_filtered(&self) -> bool {
        self.is_filtered
    }

    /// Specification of the applied filter, if any
    pub fn filter_spec(&self) -> Option<&FilterSpec> {
        self.filter_spec.as_ref()
    }

    /// Replace the acceleration with a filtered version.
    ///
    /// Derived motion series are invalidated since they no longer match
    /// the acceleration they were integrated from.
    pub fn set_filtered_acceleration(&mut self, filtered: Vec<f64>, spec: FilterSpec) {
        self.pga = peak_abs(&filtered);
        self.acceleration = filtered;
        self.is_filtered = true;
        self.filter_spec = Some(spec);
        self.velocity = None;
        self.displacement = None;
        self.pgv = None;
        self.pgd = None;
    }

    /// Store integrated velocity and displacement, refreshing peaks.
    ///
    /// Called by the integration engine once both passes complete.
    pub fn set_derived_motion(&mut self, velocity: Vec<f64>, displacement: Vec<f64>) {
        self.pgv = peak_abs(&velocity);
        self.pgd = peak_abs(&displacement);
        self.velocity = Some(velocity);
        self.displacement = Some(displacement);
    }
}

fn peak_abs(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(
        series
            .iter()
            .map(|v| v.abs())
            .fold(f64::NEG_INFINITY, f64::max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pga_computed_on_construction() {
        let c = Component::new(ComponentId::East, vec![0.5, -2.5, 1.0]);
        assert!((c.pga().unwrap() - 2.5).abs() < 1e-12);
        assert!(c.pgv().is_none());
        assert!(c.pgd().is_none());
    }

    #[test]
    fn test_derived_motion_updates_peaks() {
        let mut c = Component::new(ComponentId::North, vec![1.0, 2.0]);
        c.set_derived_motion(vec![0.1, -0.4], vec![0.02, 0.03]);
        assert!((c.pgv().unwrap() - 0.4).abs() < 1e-12);
        assert!((c.pgd().unwrap() - 0.03).abs() < 1e-12);
        assert_eq!(c.velocity().unwrap().len(), 2);
    }

    #[test]
    fn test_filtering_invalidates_derived_series() {
        let mut c = Component::new(ComponentId::Vertical, vec![1.0, -1.0]);
        c.set_derived_motion(vec![0.1, 0.1], vec![0.0, 0.0]);
        c.set_filtered_acceleration(vec![0.5, -0.5], FilterSpec::lowpass(20.0));
        assert!(c.is_filtered());
        assert!(c.velocity().is_none());
        assert!(c.pgv().is_none());
        assert!((c.pga().unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(c.filter_spec().unwrap().kind_name(), "lowpass");
    }

    #[test]
    fn test_component_codes() {
        assert_eq!(ComponentId::East.code(), "E");
        assert_eq!(ComponentId::North.code(), "N");
        assert_eq!(ComponentId::Vertical.code(), "Z");
        assert_eq!(ComponentId::ALL.len(), 3);
    }
}
