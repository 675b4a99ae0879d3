//! Glider performance profiles.
//!
//! Profiles define airspeeds, sink polars and thermalling behaviour for
//! different wing classes. They are used by flight generators to produce
//! realistic climb and sink rates.

mod hang_glider;
mod paraglider;
mod sailplane;

pub use hang_glider::HangGliderProfile;
pub use paraglider::ParagliderProfile;
pub use sailplane::SailplaneProfile;

/// Quadratic sink polar: minimum sink at one airspeed, rising either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    /// Lowest sink rate in m/s (positive down).
    pub min_sink_mps: f64,
    /// Airspeed at which the minimum sink is reached.
    pub min_sink_speed_mps: f64,
    /// Extra sink per (m/s)^2 away from the minimum sink speed.
    pub curvature: f64,
}

impl Polar {
    pub fn sink_at(&self, airspeed: f64) -> f64 {
        let delta = airspeed - self.min_sink_speed_mps;
        self.min_sink_mps + self.curvature * delta * delta
    }
}

/// Trait for glider performance profiles.
///
/// Implementations should provide:
/// - Trim airspeed and sink polar for glides
/// - Circling airspeed and turn period for thermals
/// - Typical climb and day-to-day variance
pub trait GliderProfile: Send + Sync {
    /// Hands-off cruising airspeed in m/s.
    fn trim_speed_mps(&self) -> f64;

    fn polar(&self) -> Polar;

    /// Airspeed flown while circling in m/s.
    fn circling_speed_mps(&self) -> f64;

    /// Seconds per full 360 in a thermal.
    fn circle_period_secs(&self) -> f64;

    /// Average climb rate in a typical thermal in m/s, net of the wing's own sink.
    fn typical_climb_mps(&self) -> f64;

    /// Day-to-day performance variance as a coefficient of variation (0.0 - 1.0).
    fn variance(&self) -> f64;
}

/// Still-air glide ratio at `airspeed`.
pub fn glide_ratio(profile: &dyn GliderProfile, airspeed: f64) -> f64 {
    airspeed / profile.polar().sink_at(airspeed)
}

/// Radius in meters of a thermalling circle.
pub fn circle_radius_m(profile: &dyn GliderProfile) -> f64 {
    profile.circling_speed_mps() * profile.circle_period_secs() / std::f64::consts::TAU
}

/// Samples a variance factor from normal distribution.
/// Returns a multiplier around 1.0.
pub fn sample_variance(profile: &dyn GliderProfile, rng: &mut impl rand::Rng) -> f64 {
    use rand_distr::{Distribution, Normal};

    match Normal::new(1.0, profile.variance()) {
        Ok(normal) if profile.variance() > 0.0 => normal.sample(rng).clamp(0.7, 1.4),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_polar_minimum() {
        let polar = ParagliderProfile::default().polar();
        let at_min = polar.sink_at(polar.min_sink_speed_mps);
        assert_eq!(at_min, polar.min_sink_mps);
        assert!(polar.sink_at(polar.min_sink_speed_mps + 3.0) > at_min);
        assert!(polar.sink_at(polar.min_sink_speed_mps - 3.0) > at_min);
    }

    #[test]
    fn test_wing_classes_rank_by_glide() {
        let gliders: [&dyn GliderProfile; 3] = [
            &ParagliderProfile::default(),
            &HangGliderProfile::default(),
            &SailplaneProfile::default(),
        ];
        let ratios: Vec<f64> = gliders
            .iter()
            .map(|p| glide_ratio(*p, p.trim_speed_mps()))
            .collect();
        assert!(ratios[0] < ratios[1]);
        assert!(ratios[1] < ratios[2]);
    }

    #[test]
    fn test_sample_variance_is_bounded() {
        let profile = ParagliderProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let factor = sample_variance(&profile, &mut rng);
            assert!((0.7..=1.4).contains(&factor));
        }
    }

    #[test]
    fn test_circle_radius() {
        let profile = SailplaneProfile::default();
        let radius = circle_radius_m(&profile);
        let circumference = profile.circling_speed_mps() * profile.circle_period_secs();
        assert!((radius * std::f64::consts::TAU - circumference).abs() < 1e-9);
    }
}
