//! Configuration types for synthetic flight generation.

use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// A launch site: take-off position and altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Site {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Take-off altitude in meters.
    pub alt: f64,
}

impl Site {
    pub const fn new(name: &'static str, lat: f64, lon: f64, alt: f64) -> Self {
        Self { name, lat, lon, alt }
    }

    /// Annecy, Col de la Forclaz - classic alpine XC launch.
    pub const ANNECY: Site = Site::new("annecy", 45.8108, 6.2372, 1250.0);

    /// Bassano del Grappa, Italian prealps.
    pub const BASSANO: Site = Site::new("bassano", 45.8167, 11.7833, 1500.0);

    /// Owens Valley, Walts Point - big desert thermals.
    pub const OWENS_VALLEY: Site = Site::new("owens_valley", 36.4639, -118.0233, 2700.0);

    pub const ALL: [Site; 3] = [Site::ANNECY, Site::BASSANO, Site::OWENS_VALLEY];

    /// Offsets the site by `east_m`, `north_m` meters, returning (lat, lon).
    pub fn offset(&self, east_m: f64, north_m: f64) -> (f64, f64) {
        // Rough approximation: 1 degree lat ~ 111km, lon shrinks with latitude
        let lat = self.lat + north_m / 111_000.0;
        let lon = self.lon + east_m / (111_000.0 * self.lat.to_radians().cos());
        (lat, lon)
    }
}

/// Configuration for procedural flight generation.
#[derive(Debug, Clone)]
pub struct FlightConfig {
    pub launch: Site,
    /// Number of thermals climbed after the opening glide.
    pub thermals: usize,
    /// Altitude gained per thermal (min, max) in meters.
    pub thermal_gain_m: (f64, f64),
    /// Altitude lost per glide (min, max) in meters.
    pub glide_loss_m: (f64, f64),
    /// Receiver logging interval in seconds.
    pub fix_interval_secs: i64,
    /// GPS position jitter standard deviation in meters.
    pub gps_jitter_m: f64,
    /// GPS altitude jitter standard deviation in meters.
    pub alt_jitter_m: f64,
    /// Wind speed in m/s.
    pub wind_speed_mps: f64,
    /// Direction the wind blows from, degrees clockwise from north.
    pub wind_from_deg: f64,
    /// Per-fix probability of the receiver losing lock.
    pub dropout_probability: f64,
    /// Duration range for dropouts (min, max) in seconds.
    pub dropout_secs: (i64, i64),
    /// Seconds of stationary logging on launch before take-off.
    pub ground_secs: i64,
    pub take_off: OffsetDateTime,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            launch: Site::ANNECY,
            thermals: 3,
            thermal_gain_m: (500.0, 900.0),
            glide_loss_m: (300.0, 500.0),
            fix_interval_secs: 1,
            gps_jitter_m: 3.0,
            alt_jitter_m: 2.0,
            wind_speed_mps: 3.0,
            wind_from_deg: 270.0,
            dropout_probability: 0.002,
            dropout_secs: (5, 30),
            ground_secs: 120,
            // 2024-07-03 10:40 UTC
            take_off: OffsetDateTime::UNIX_EPOCH + Duration::seconds(1_720_003_200),
        }
    }
}

impl FlightConfig {
    /// A noiseless receiver: no jitter, no dropouts.
    ///
    /// Altitude is then monotone within every phase so the analysed extrema
    /// line up exactly with the scripted phase boundaries.
    pub fn clean() -> Self {
        Self {
            gps_jitter_m: 0.0,
            alt_jitter_m: 0.0,
            dropout_probability: 0.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_north_is_latitude() {
        let (lat, lon) = Site::ANNECY.offset(0.0, 111_000.0);
        assert!((lat - (Site::ANNECY.lat + 1.0)).abs() < 1e-9);
        assert_eq!(lon, Site::ANNECY.lon);
    }

    #[test]
    fn test_offset_east_widens_with_latitude() {
        let (_, lon) = Site::ANNECY.offset(1000.0, 0.0);
        let equator = Site::new("null_island", 0.0, 0.0, 0.0).offset(1000.0, 0.0).1;
        assert!(lon - Site::ANNECY.lon > equator);
    }

    #[test]
    fn test_clean_config_has_no_noise() {
        let config = FlightConfig::clean();
        assert_eq!(config.gps_jitter_m, 0.0);
        assert_eq!(config.alt_jitter_m, 0.0);
        assert_eq!(config.dropout_probability, 0.0);
        assert_eq!(config.thermals, FlightConfig::default().thermals);
    }
}
