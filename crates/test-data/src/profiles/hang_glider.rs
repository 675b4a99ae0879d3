//! Hang glider performance profile.

use super::{GliderProfile, Polar};

/// Performance profile for a topless flex-wing hang glider.
///
/// - Trim speed: ~50 km/h (14 m/s)
/// - Minimum sink: ~0.85 m/s at 11 m/s
/// - Glide ratio at trim: ~12.5
#[derive(Debug, Clone)]
pub struct HangGliderProfile {
    trim_speed: f64,
    polar: Polar,
    circling_speed: f64,
    circle_period: f64,
    typical_climb: f64,
    variance: f64,
}

impl Default for HangGliderProfile {
    fn default() -> Self {
        Self {
            trim_speed: 14.0,
            polar: Polar {
                min_sink_mps: 0.85,
                min_sink_speed_mps: 11.0,
                curvature: 0.03,
            },
            circling_speed: 12.0,
            circle_period: 22.0,
            typical_climb: 2.2,
            variance: 0.1,
        }
    }
}

impl GliderProfile for HangGliderProfile {
    fn trim_speed_mps(&self) -> f64 {
        self.trim_speed
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
