//! Sailplane performance profile.

use super::{GliderProfile, Polar};

/// Performance profile for a standard class sailplane.
///
/// - Cruise: ~100 km/h (28 m/s)
/// - Minimum sink: ~0.55 m/s at 22 m/s
/// - Glide ratio at cruise: ~36
#[derive(Debug, Clone)]
pub struct SailplaneProfile {
    cruise_speed: f64,
    polar: Polar,
    circling_speed: f64,
    circle_period: f64,
    typical_climb: f64,
    variance: f64,
}

impl Default for SailplaneProfile {
    fn default() -> Self {
        Self {
            cruise_speed: 28.0,
            polar: Polar {
                min_sink_mps: 0.55,
                min_sink_speed_mps: 22.0,
                curvature: 0.006,
            },
            circling_speed: 25.0,
            circle_period: 30.0,
            typical_climb: 2.5,
            variance: 0.12,
        }
    }
}

impl SailplaneProfile {
    /// Cruise speed from a MacCready setting, loosely: 5 m/s above minimum
    /// sink speed per m/s of expected climb.
    pub fn with_mac_cready(mc_mps: f64) -> Self {
        let defaults = Self::default();
        Self {
            cruise_speed: defaults.polar.min_sink_speed_mps + 5.0 * mc_mps.max(0.0),
            ..defaults
        }
    }
}

impl GliderProfile for SailplaneProfile {
    fn trim_speed_mps(&self) -> f64 {
        self.cruise_speed
    }

    fn polar(&self) -> Polar {
        self.polar
    }

    fn circling_speed_mps(&self) -> f64 {
        self.circling_speed
    }

    fn circle_period_secs(&self) -> f64 {
        self.circle_period
    }

    fn typical_climb_mps(&self) -> f64 {
        self.typical_climb
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}
