//! Filter Specification Types

use serde::{Deserialize, Serialize};

/// Digital Butterworth filter specification, one variant per band shape.
///
/// Each variant carries only the fields that shape needs, so an
/// incomplete or contradictory parameter set cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterSpec {
    /// Pass frequencies below `cutoff_hz`
    Lowpass { cutoff_hz: f64, order: u32 },
    /// Pass frequencies above `cutoff_hz`
    Highpass { cutoff_hz: f64, order: u32 },
    /// Pass frequencies between `lowcut_hz` and `highcut_hz`
    Bandpass {
        lowcut_hz: f64,
        highcut_hz: f64,
        order: u32,
    },
}

impl FilterSpec {
    /// Default filter order when none is given
    pub const DEFAULT_ORDER: u32 = 4;

    /// Lowpass at `cutoff_hz` with the default order
    pub fn lowpass(cutoff_hz: f64) -> Self {
        Self::Lowpass {
            cutoff_hz,
            order: Self::DEFAULT_ORDER,
        }
    }

    /// Highpass at `cutoff_hz` with the default order
    pub fn highpass(cutoff_hz: f64) -> Self {
        Self::Highpass {
            cutoff_hz,
            order: Self::DEFAULT_ORDER,
        }
    }

    /// Bandpass between `lowcut_hz` and `highcut_hz` with the default order
    pub fn bandpass(lowcut_hz: f64, highcut_hz: f64) -> Self {
        Self::Bandpass {
            lowcut_hz,
            highcut_hz,
            order: Self::DEFAULT_ORDER,
        }
    }

    /// Requested filter order
    pub fn order(&self) -> u32 {
        match *self {
            Self::Lowpass { order, .. }
            | Self::Highpass { order, .. }
            | Self::Bandpass { order, .. } => order,
        }
    }

    /// Band shape name for log messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Lowpass { .. } => "lowpass",
            Self::Highpass { .. } => "highpass",
            Self::Bandpass { .. } => "bandpass",
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::lowpass(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_use_default_order() {
        assert_eq!(FilterSpec::lowpass(5.0).order(), 4);
        assert_eq!(FilterSpec::highpass(0.1).order(), 4);
        assert_eq!(FilterSpec::bandpass(0.1, 10.0).order(), 4);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FilterSpec::lowpass(5.0).kind_name(), "lowpass");
        assert_eq!(FilterSpec::highpass(5.0).kind_name(), "highpass");
        assert_eq!(FilterSpec::bandpass(1.0, 5.0).kind_name(), "bandpass");
    }

    #[test]
    fn test_default_is_lowpass_10hz() {
        match FilterSpec::default() {
            FilterSpec::Lowpass { cutoff_hz, order } => {
                assert_eq!(cutoff_hz, 10.0);
                assert_eq!(order, 4);
            }
            other => panic!("unexpected default: {:?}", other),
        }
    }
}
