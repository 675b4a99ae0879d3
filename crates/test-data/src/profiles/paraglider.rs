//! Paraglider performance profile.

use super::{GliderProfile, Polar};

/// Performance profile for an EN-B class paraglider.
///
/// - Trim speed: ~38 km/h (10.5 m/s)
/// - Minimum sink: ~1.0 m/s at 9 m/s
/// - Glide ratio at trim: ~9.5
#[derive(Debug, Clone)]
pub struct ParagliderProfile {
    trim_speed: f64,
    polar: Polar,
    circle_period: f64,
    typical_climb: f64,
    variance: f64,
}

impl Default for ParagliderProfile {
    fn default() -> Self {
        Self {
            trim_speed: 10.5,
            polar: Polar {
                min_sink_mps: 1.0,
                min_sink_speed_mps: 9.0,
                curvature: 0.05,
            },
            circle_period: 20.0,
            typical_climb: 2.0,
            variance: 0.1,
        }
    }
}

impl ParagliderProfile {
    /// A competition wing: faster trim and flatter polar.
    pub fn competition() -> Self {
        Self {
            trim_speed: 11.5,
            polar: Polar {
                min_sink_mps: 0.95,
                min_sink_speed_mps: 9.5,
                curvature: 0.035,
            },
            ..Default::default()
        }
    }
}

impl GliderProfile for ParagliderProfile {
    fn trim_speed_mps(&self) -> f64 {
        self.trim_speed
    }

    fn polar(&self) -> Polar {
        self.polar
    }

    fn circling_speed_mps(&self) -> f64 {
        self.polar.min_sink_speed_mps
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
